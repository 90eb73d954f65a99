use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a JSON lambda query into query text and bindings
    Compile {
        #[arg(long, help = "Lambda query file path (JSON)")]
        query: String,

        #[arg(
            long,
            help = "Schema file mapping item types and getters to tables and columns; \
                    naming conventions are used when omitted"
        )]
        schema: Option<String>,

        #[arg(
            long,
            default_value = "Model",
            help = "Type-name suffix stripped by the naming conventions"
        )]
        suffix: String,

        #[arg(long, help = "If set, prints the compiled query as JSON")]
        json: bool,

        #[arg(
            long,
            help = "If specified, writes the result to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Parse a lambda query file and print its normalized expression tree
    Ast {
        #[arg(long, help = "Lambda query file path (JSON)")]
        query: String,
    },
}
