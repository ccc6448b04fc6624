// Template schemas: the per-template field-descriptor trees, the shared
// option-set table they reference, and the settings-UI generator that walks
// them.

pub mod options;
pub mod registry;
pub mod ui;
