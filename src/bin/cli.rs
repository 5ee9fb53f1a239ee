use assign_tool::engine::AssignmentEngine;
use assign_tool::persistence;
use assign_tool::scoring::ScoreWeights;
use std::process;
use tracing_subscriber::EnvFilter;

struct CliArgs {
    input: String,
    output: String,
    individual_weight: f64,
    section_weight: f64,
    greedy: bool,
    json: Option<String>,
}

fn print_usage() {
    println!(
        "Usage: cli --input <preferences.csv> [options]\n\nOptions:\n  -i, --input <path>            Preference CSV to assign (required)\n  -o, --output <dir>            Output directory for result CSVs (default: output)\n      --individual-weight <f>   Weight on the employee's own history (default: 0.7)\n      --section-weight <f>      Weight on the section-wide share (default: 0.3)\n      --greedy                  Skip the optimizer and use greedy assignment\n      --json <path>             Also write the full run outcome as JSON\n  -h, --help                    Show this help"
    );
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut output = "output".to_string();
    let mut individual_weight = 0.7;
    let mut section_weight = 0.3;
    let mut greedy = false;
    let mut json = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-i" | "--input" => {
                input = Some(args.next().ok_or("--input requires a path")?);
            }
            "-o" | "--output" => {
                output = args.next().ok_or("--output requires a path")?;
            }
            "--individual-weight" => {
                let raw = args.next().ok_or("--individual-weight requires a value")?;
                individual_weight = raw
                    .parse::<f64>()
                    .map_err(|_| format!("invalid --individual-weight '{raw}'"))?;
            }
            "--section-weight" => {
                let raw = args.next().ok_or("--section-weight requires a value")?;
                section_weight = raw
                    .parse::<f64>()
                    .map_err(|_| format!("invalid --section-weight '{raw}'"))?;
            }
            "--greedy" => greedy = true,
            "--json" => {
                json = Some(args.next().ok_or("--json requires a path")?);
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("unrecognized argument '{other}'")),
        }
    }

    let input = input.ok_or("--input is required")?;
    Ok(CliArgs {
        input,
        output,
        individual_weight,
        section_weight,
        greedy,
        json,
    })
}

fn run(args: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let roster = persistence::load_roster_from_csv(&args.input)?;
    let weights = ScoreWeights::new(args.individual_weight, args.section_weight);
    let engine = AssignmentEngine::new(weights).greedy_only(args.greedy);

    let outcome = engine.assign_roster(&roster)?;

    for section in &outcome.sections {
        println!("{}", section.to_cli_summary());
    }
    println!("{}", outcome.to_cli_summary());

    persistence::save_outcome_to_csv(&outcome, &args.output)?;
    println!("results written to {}", args.output);

    if let Some(path) = &args.json {
        persistence::save_outcome_to_json(&outcome, path)?;
        println!("json outcome written to {path}");
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {message}\n");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}
