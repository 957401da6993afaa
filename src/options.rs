use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ProgramArguments {
    /// Output argument tokens as they are classified
    #[arg(short, long, default_value = "false")]
    pub dump_tokens: bool,

    /// Hold rendered output back until validation has finished
    #[arg(short, long, default_value = "false")]
    pub capture: bool,

    /// Print an error count when validation fails without --verbose
    #[arg(short, long, default_value = "false")]
    pub summary: bool,

    /// Arguments handed to the parameter parser, after `--`
    #[arg(last = true)]
    pub forwarded: Vec<String>,
}

pub fn parse_args() -> ProgramArguments {
    ProgramArguments::parse()
}
