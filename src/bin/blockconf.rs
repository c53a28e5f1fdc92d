//! Command-line interface for blockconf
//! This binary parses block configuration files and prints them back in one of the supported formats.
//!
//! Usage:
//!   blockconf render `<path>` [--format `<format>`] [--config `<file>`]   - Print the whole tree
//!   blockconf find `<path>` `<query>` [--all] [--format `<format>`]      - Print the node(s) matching a path
//!                                                                   (`--all` with json prints an array)
//!   blockconf list-formats                                          - List all available output formats
//!
//! Logging goes to stderr and is controlled by `BLOCKCONF_LOG` (e.g. `BLOCKCONF_LOG=debug`).

use blockconf::config::{BlockconfConfig, Loader};
use blockconf::{parse_file_with, ConfigTree, FormatRegistry};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let config_arg = Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML file layered over the built-in settings");
    let format_arg = Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format (e.g., 'block', 'json')")
        .default_value("block");

    let matches = Command::new("blockconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting Apache-style block configuration files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Parse a file and print the whole tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the configuration file")
                        .required(true)
                        .index(1),
                )
                .arg(format_arg.clone())
                .arg(config_arg.clone()),
        )
        .subcommand(
            Command::new("find")
                .about("Print the first node (or all nodes) matching a path like /IfModule/IfModule")
                .arg(
                    Arg::new("path")
                        .help("Path to the configuration file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("query")
                        .help("Slash-separated node path")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .short('a')
                        .help("Print every match instead of the first one")
                        .action(ArgAction::SetTrue),
                )
                .arg(format_arg)
                .arg(config_arg),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("render", render_matches)) => handle_render_command(render_matches),
        Some(("find", find_matches)) => handle_find_command(find_matches),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("BLOCKCONF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print an error and leave with a failure status
fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_config(matches: &ArgMatches) -> BlockconfConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(format!("invalid configuration: {}", e)))
}

fn load_tree(matches: &ArgMatches, config: &BlockconfConfig) -> ConfigTree {
    let path = matches
        .get_one::<String>("path")
        .unwrap_or_else(|| fail("missing file path"));
    parse_file_with(path, &config.parse.build_options()).unwrap_or_else(|e| fail(e))
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let tree = load_tree(matches, &config);
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("block");

    let registry = FormatRegistry::from_config(&config.render);
    let output = registry
        .serialize(&tree, format)
        .unwrap_or_else(|e| fail(e));
    print!("{}", output);
}

/// Handle the find command
fn handle_find_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let tree = load_tree(matches, &config);
    let query = matches
        .get_one::<String>("query")
        .unwrap_or_else(|| fail("missing query"));
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("block");

    let found = if matches.get_flag("all") {
        tree.find_all(query)
    } else {
        tree.find(query).into_iter().collect()
    };
    if found.is_empty() {
        fail(format!("no node matches '{}'", query));
    }

    let registry = FormatRegistry::from_config(&config.render);
    let outputs: Vec<String> = found
        .iter()
        .map(|node| {
            registry
                .serialize_node(&tree, node.id(), format)
                .unwrap_or_else(|e| fail(e))
        })
        .collect();

    // With --all, JSON matches are printed as one array
    if format == "json" && matches.get_flag("all") {
        let items: Vec<&str> = outputs.iter().map(|o| o.trim_end()).collect();
        println!("[\n{}\n]", items.join(",\n"));
    } else {
        for output in outputs {
            print!("{}", output);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {}", name);
        println!("    {}", description);
    }
}
