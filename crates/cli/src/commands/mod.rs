use clap::Subcommand;

pub mod vault;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a vault command, automatically logged in to the service instance's Vault
    ///
    /// Everything after the service name belongs to vault, including -h and -v.
    #[command(disable_help_flag = true)]
    #[command(after_help = "Example:\n   cf-vault vault my-service-name read {cf_o,cf_s,cf_i}/xxx\n\n\
        Argument aliases:\n   \
        cf_o/  organization shared backend\n   \
        cf_s/  space shared backend\n   \
        cf_i/  instance backend")]
    Vault {
        /// Name of the Vault service instance
        service: Option<String>,

        /// Arguments passed to vault, with aliases expanded
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}
