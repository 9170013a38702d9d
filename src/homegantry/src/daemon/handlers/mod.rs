pub(super) mod events;
pub(super) mod health;
pub(super) mod manual;
pub(super) mod overrides;
pub(super) mod services;
pub(super) mod settings;
pub(super) mod stacks;
