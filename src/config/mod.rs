pub mod cli;
pub mod toml_config;

pub const DEFAULT_SIZE: u32 = 10;
pub const DEFAULT_CELL_SIZE: u32 = 30;

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use super::toml_config::TomlConfig;
    use super::{DEFAULT_CELL_SIZE, DEFAULT_SIZE};
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_table_dimensions, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
    #[command(name = "factor-table")]
    #[command(about = "Render a multiplication table colored by prime factors")]
    pub struct CliConfig {
        /// Number of rows and columns [default: 10]
        #[arg(long)]
        pub size: Option<u32>,

        /// Cell edge length in pixels [default: 30]
        #[arg(long)]
        pub cell_size: Option<u32>,

        /// Optional TOML file with [table] and [monitoring] sections
        #[arg(long)]
        pub config: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,
    }

    impl CliConfig {
        /// Fills values not given on the command line from the config file.
        pub fn apply_file_defaults(&mut self, file: &TomlConfig) {
            if self.size.is_none() {
                self.size = file.table_size();
            }
            if self.cell_size.is_none() {
                self.cell_size = file.table_cell_size();
            }
            if !self.monitor {
                self.monitor = file.monitoring_enabled();
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn size(&self) -> u32 {
            self.size.unwrap_or(DEFAULT_SIZE)
        }

        fn cell_size(&self) -> u32 {
            self.cell_size.unwrap_or(DEFAULT_CELL_SIZE)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_table_dimensions(self.size(), self.cell_size())
        }
    }

}
