use clap::{Parser, Subcommand};
use miette::{MietteHandlerOpts, Report};
use std::process;
use typeeval_engine::{EngineError, RefinementRequest};

#[derive(Parser)]
#[command(
    name = "typeeval",
    version,
    about = "Out-of-process type map and refinement evaluation",
    long_about = "Evaluates serialized type expressions on behalf of a static analysis engine: \
                  type map invocation and tri-state refinement of types against predicates."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a type map expression and print its rewrite
    MapType {
        /// The type map expression to evaluate, e.g. `Map[type, int, str]`
        #[arg(value_name = "EXPR")]
        expr: String,

        /// Serialized symbol table literal, e.g. `{"Rewrite": "Map"}`
        #[arg(short = 's', long = "symbol-table", default_value = "{}")]
        symbol_table: String,
    },

    /// Classify a type against predicate expressions
    RefineType {
        /// The type expression under refinement
        #[arg(short = 't', long = "type", value_name = "EXPR")]
        type_expr: String,

        /// A test predicate, evaluated in order (repeatable)
        #[arg(long = "test", value_name = "EXPR", required = true)]
        tests: Vec<String>,

        /// An assumption predicate establishing a precondition (repeatable)
        #[arg(long = "assume", value_name = "EXPR")]
        assumptions: Vec<String>,

        /// Serialized symbol table literal
        #[arg(short = 's', long = "symbol-table", default_value = "{}")]
        symbol_table: String,

        /// Serialized typevar table literal, e.g. `{"T": "IsSequenceOf[int]"}`
        #[arg(long = "typevar-table", default_value = "{}")]
        typevar_table: String,
    },
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();

    // Results go to stdout, diagnostics to stderr; the calling analysis
    // engine reads stdout verbatim
    if let Err(error) = run(cli.command) {
        eprintln!("{:?}", Report::new(error));
        process::exit(1);
    }
}

fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn run(command: Commands) -> Result<(), EngineError> {
    match command {
        Commands::MapType { expr, symbol_table } => {
            if let Some(rewritten) = typeeval_engine::map_type(&expr, &symbol_table)? {
                println!("{rewritten}");
            }
            Ok(())
        }
        Commands::RefineType {
            type_expr,
            tests,
            assumptions,
            symbol_table,
            typevar_table,
        } => {
            let request = RefinementRequest {
                type_expr,
                assumptions: if assumptions.is_empty() {
                    None
                } else {
                    Some(assumptions)
                },
                tests,
            };
            let status = typeeval_engine::refine_type(&request, &symbol_table, &typevar_table)?;
            println!("{status}");
            Ok(())
        }
    }
}
