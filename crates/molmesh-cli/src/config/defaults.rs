use super::models::OutputFormat;

pub struct DefaultsConfig {
    pub format: OutputFormat,
    pub normalize: bool,
    pub symmetry: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Listing,
            normalize: true,
            symmetry: false,
        }
    }
}
