//! Posit CLI
//!
//! Validates definition registries and replays persisted models.

use positc::commands::{
    check_registry, dump_registry, explain_error, gen_model, load_model, parse_options,
    render_dispatch, CliError, CommandOptions,
};

fn main() {
    positc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let outcome = match command.as_str() {
        "check" => options_or_exit(&args[2..], "check [<registry.json> | --builtin]")
            .and_then(|opts| check_registry(&opts.registry_or_positional())),
        "registry" => options_or_exit(&args[2..], "registry [<registry.json> | --builtin]")
            .and_then(|opts| dump_registry(&opts.registry_or_positional())),
        "dispatch" => options_or_exit(&args[2..], "dispatch [<definition>] [--registry <file>]")
            .and_then(|opts| {
                render_dispatch(&opts.registry, opts.positional.first().map(String::as_str))
            }),
        "load" | "gen" => {
            if args.len() < 3 {
                eprintln!("Usage: positc {command} <model.json> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --registry <file>   Resolve against a registry document");
                eprintln!("  --builtin           Resolve against the built-in table (default)");
                eprintln!("  --skip-failures     Report failing constraints and keep going");
                eprintln!("  --no-parallel       Resolve sequentially");
                std::process::exit(1);
            }
            let usage = format!("{command} <model.json> [options]");
            options_or_exit(&args[2..], &usage).and_then(|opts| {
                let Some(model) = opts.positional.first() else {
                    return Err(CliError::Usage(format!("positc {command} <model.json>")));
                };
                if command == "load" {
                    load_model(model, &opts)
                } else {
                    gen_model(model, &opts)
                }
            })
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-v" => {
            println!("Posit {}", env!("CARGO_PKG_VERSION"));
            println!("Constraint reconstruction by signature dispatch");
            return;
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: positc --explain <ERROR_CODE>");
                eprintln!("Example: positc --explain E2001");
                std::process::exit(1);
            }
            explain_error(&args[2])
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match outcome {
        Ok(report) => print!("{report}"),
        Err(err) => {
            eprintln!("error: {err}");
            if let Some(code) = err.code() {
                eprintln!("  (run `positc --explain {code}` for details)");
            }
            std::process::exit(1);
        }
    }
}

fn options_or_exit(args: &[String], usage: &str) -> Result<CommandOptions, CliError> {
    parse_options(args).map_err(|err| match err {
        CliError::Usage(flag) => CliError::Usage(format!("{flag}\nUsage: positc {usage}")),
        other => other,
    })
}

fn print_usage() {
    println!("Posit constraint reconstruction");
    println!();
    println!("Usage: positc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check [<registry.json>]     Validate a registry (built-in by default)");
    println!("  registry [<registry.json>]  Print a registry as JSON");
    println!("  dispatch [<definition>]     Print generated dispatch routines");
    println!("  load <model.json>           Rebuild a model and list the posted calls");
    println!("  gen <model.json>            Emit posting source for a model");
    println!("  explain <CODE>              Explain an error code");
    println!("  help                        Show this help message");
    println!("  version                     Show version information");
    println!();
    println!("Set POSIT_LOG (e.g. POSIT_LOG=debug) to trace resolution.");
}
