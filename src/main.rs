//! marticle - article HTML to typed components

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use marticle::{ArticleData, ArticleParser, HeadingStyle, MarkdownOptions, decode_text};

#[derive(Parser)]
#[command(name = "marticle")]
#[command(version, about = "Convert article HTML into typed article components", long_about = None)]
#[command(after_help = "EXAMPLES:
    marticle article.html             Print components as JSON
    marticle --article parsed.json    Resolve media from a legacy parser response
    cat article.html | marticle -     Read from stdin")]
struct Cli {
    /// Input file, or `-` for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Input is a legacy parser JSON document (`article`, `images`, `videos`, `givenUrl`)
    #[arg(short, long)]
    article: bool,

    /// Heading style used in heading content
    #[arg(long, value_enum, default_value_t = HeadingStyle::Atx)]
    heading_style: HeadingStyle,

    /// Delimiter for emphasis (`em`, `i`)
    #[arg(long, value_name = "DELIM", default_value = "_")]
    em_delimiter: String,

    /// Delimiter for strong emphasis (`strong`, `b`)
    #[arg(long, value_name = "DELIM", default_value = "**")]
    strong_delimiter: String,

    /// Keep struck-through text plain instead of wrapping it in `~`
    #[arg(long)]
    no_strikethrough: bool,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> marticle::Result<()> {
    let bytes = read_input(&cli.input)?;
    let text = decode_text(&bytes);

    let options = MarkdownOptions::default()
        .with_heading_style(cli.heading_style)
        .with_em_delimiter(cli.em_delimiter.as_str())
        .with_strong_delimiter(cli.strong_delimiter.as_str())
        .with_strikethrough(!cli.no_strikethrough);
    let parser = ArticleParser::new(options);

    let components = if cli.article {
        let article = ArticleData::from_json(&text)?;
        parser.parse_article(&article)
    } else {
        parser.parse(&text)
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&components)?
    } else {
        serde_json::to_string(&components)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

fn read_input(path: &str) -> io::Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read(path)
    }
}
