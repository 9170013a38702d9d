use std::fs;

fn main() {
    // useful to trigger changes in the cargo build on the embedded yml files
    let known_services_dir = "src/service_identification/yml_rules";

    if let Ok(entries) = fs::read_dir(known_services_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if let Some(extension) = path.extension() {
                if extension == "yml" || extension == "yaml" {
                    if let Some(path_str) = path.to_str() {
                        println!("cargo:rerun-if-changed={}", path_str);
                    }
                }
            }
        }
    }
}
