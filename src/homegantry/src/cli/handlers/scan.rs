use crate::cli::handlers::build_engine;
use crate::config::Config;
use crate::constants::OVERRIDES_FILE;
use crate::storage::OverrideStore;
use crate::types::Service;
use anyhow::{Context, Result};
use std::sync::Arc;

/// One full scan; fails when the runtime cannot be reached.
pub async fn scan(config: Config, json: bool) -> Result<()> {
    let overrides = Arc::new(OverrideStore::open(config.data_dir.join(OVERRIDES_FILE)).await);
    let engine = build_engine(&config, overrides)?;
    engine
        .full_scan()
        .await
        .with_context(|| format!("Failed to scan containers via {}", config.docker_socket))?;

    let services = engine.services().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&services)?);
    } else {
        print!("{}", render_table(&services));
    }
    Ok(())
}

fn render_table(services: &[Service]) -> String {
    let rows: Vec<[&str; 4]> = services
        .iter()
        .map(|service| {
            [
                service.name.as_str(),
                service.category.as_str(),
                service.status.as_str(),
                service.url.as_str(),
            ]
        })
        .collect();

    let header = ["NAME", "CATEGORY", "STATUS", "URL"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ServiceSource, ServiceStatus};

    fn service(name: &str, url: &str) -> Service {
        Service {
            id: name.to_string(),
            source: ServiceSource::Container,
            name: name.to_string(),
            description: String::new(),
            url: url.to_string(),
            icon: String::new(),
            category: "Media".to_string(),
            status: ServiceStatus::Running,
            stack: None,
            container: None,
            hidden: false,
            sort_order: 0,
        }
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = render_table(&[
            service("Jellyfin", "http://localhost:8096"),
            service("Plex", "#"),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "NAME      CATEGORY  STATUS   URL");
        assert_eq!(lines[1], "Jellyfin  Media     running  http://localhost:8096");
        assert_eq!(lines[2], "Plex      Media     running  #");
    }

    #[test]
    fn test_render_table_empty_catalog() {
        assert_eq!(render_table(&[]), "NAME  CATEGORY  STATUS  URL\n");
    }
}
