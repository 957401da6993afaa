mod options;

use std::error::Error;

use paramparse::{Declaration, Emit, Kind, OutputConfig, Parser, Tokenizer};

const DESCRIPTION: &str = "This is an argument parser, a project description goes here.";

fn declarations() -> [Declaration; 4] {
    [
        Declaration::new()
            .mandatory(true)
            .kind(Kind::String)
            .description("A required string.")
            .default_value("")
            .aliases(["r", "req-string"]),
        Declaration::new()
            .mandatory(false)
            .kind(Kind::String)
            .description("An optional string.")
            .default_value("")
            .aliases(["o", "optional-string"]),
        Declaration::new()
            .mandatory(true)
            .kind(Kind::Enumerated)
            .description("A required enumerated value.")
            .default_value(false)
            .aliases(["build", "deploy", "test"]),
        Declaration::new()
            .mandatory(true)
            .kind(Kind::Enumerated)
            .description("When to run.")
            .default_value(false)
            .aliases(["now", "5-mins", "10-mins"]),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = options::parse_args();

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned());
    let argv: Vec<String> = std::iter::once(program).chain(args.forwarded).collect();

    if args.dump_tokens {
        for tok in Tokenizer::new(&argv) {
            eprintln!("{tok:?}");
        }
    }

    let config = OutputConfig {
        emit: if args.capture { Emit::Capture } else { Emit::Stdout },
        failure_summary: args.summary,
    };
    let mut parser = Parser::new(argv, DESCRIPTION).with_config(config);
    for decl in declarations() {
        parser.register(decl)?;
    }

    let result = parser.validate();
    print!("{}", parser.take_output());
    if let Err(failure) = result {
        std::process::exit(failure.status());
    }
    if let Some(resolved) = parser.args() {
        for (alias, value) in resolved.iter() {
            println!("{alias} = {value}");
        }
    }
    Ok(())
}
