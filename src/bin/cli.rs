use chrono::{Local, NaiveDate};
use polars::prelude::{DataFrame, PolarsResult};
use staff_scheduler::report::{
    render_text_table, resources_frame, results_frame, work_items_frame,
};
use staff_scheduler::{
    RunContext, SchedulerConfig, load_plan_from_json, load_resources_from_csv,
    load_work_items_from_csv, save_plan_to_json, save_results_to_csv, save_results_to_json,
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  load resources <csv>               Load resources (Resource ID, Name, Type, Leave Schedule)\n  load tasks <csv>                   Load work items (Jira ID, Task, Dev Effort, Tester Effort, Priority)\n  load plan <json>                   Load resources and work items from a JSON plan\n  config <json>                      Load scheduler configuration\n  show resources                     Show resources after the last run\n  show initial                       Show resources as loaded\n  show tasks                         Show work items\n  show results                       Show assignments from the last run\n  show log                           Show the log of the last run\n  show config                        Show scheduler configuration\n  run [YYYY-MM-DD]                   Schedule all work items (default: today)\n  save plan <json>                   Persist loaded resources and work items\n  save results <json|csv> <path>     Persist assignments from the last run\n  quit|exit                          Exit"
    );
}

fn print_frame(frame: PolarsResult<DataFrame>) {
    match frame {
        Ok(df) => println!("{}", render_text_table(&df)),
        Err(e) => println!("Error building table: {}", e),
    }
}

fn print_config(context: &RunContext) {
    let config = context.config();
    let working_days = config
        .calendar
        .working_days()
        .iter()
        .map(|wd| wd.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let holidays = config
        .calendar
        .holidays()
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("Max search attempts: {}", config.max_search_attempts);
    println!("Working days       : {}", working_days);
    println!("Holidays           : {}", holidays);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut context = match SchedulerConfig::from_env().and_then(RunContext::new) {
        Ok(context) => context,
        Err(e) => {
            println!("Error loading configuration: {}", e);
            RunContext::default()
        }
    };

    println!("Staff Scheduler (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "load" => match (parts.next(), parts.next()) {
                (Some("resources"), Some(path)) => match load_resources_from_csv(path) {
                    Ok(resources) => {
                        let count = resources.len();
                        match context.set_resources(resources) {
                            Ok(_) => {
                                println!("Loaded {} resources from {}.", count, path);
                                print_frame(resources_frame(context.initial_resources()));
                            }
                            Err(e) => println!("Error loading resources: {}", e),
                        }
                    }
                    Err(e) => println!("Error loading resources: {}", e),
                },
                (Some("tasks"), Some(path)) => match load_work_items_from_csv(path) {
                    Ok(items) => {
                        let count = items.len();
                        match context.set_work_items(items) {
                            Ok(_) => {
                                println!("Loaded {} work items from {}.", count, path);
                                print_frame(work_items_frame(context.work_items()));
                            }
                            Err(e) => println!("Error loading work items: {}", e),
                        }
                    }
                    Err(e) => println!("Error loading work items: {}", e),
                },
                (Some("plan"), Some(path)) => match load_plan_from_json(path) {
                    Ok(plan) => match context.replace_plan(plan.resources, plan.work_items) {
                        Ok(_) => println!(
                            "Plan loaded from {} ({} resources, {} work items).",
                            path,
                            context.initial_resources().len(),
                            context.work_items().len()
                        ),
                        Err(e) => println!("Error loading plan: {}", e),
                    },
                    Err(e) => println!("Error loading plan: {}", e),
                },
                _ => println!("Usage: load <resources|tasks> <csv> | load plan <json>"),
            },
            "config" => match parts.next() {
                Some(path) => match SchedulerConfig::from_json_file(path) {
                    Ok(config) => match context.set_config(config) {
                        Ok(_) => {
                            println!("Configuration loaded from {}.", path);
                            print_config(&context);
                        }
                        Err(e) => println!("Error applying configuration: {}", e),
                    },
                    Err(e) => println!("Error reading {}: {}", path, e),
                },
                None => println!("Usage: config <json_path>"),
            },
            "show" => match parts.next() {
                Some("initial") => print_frame(resources_frame(context.initial_resources())),
                Some("resources") => match context.last_run() {
                    Some(run) => print_frame(resources_frame(&run.resources)),
                    None => print_frame(resources_frame(context.initial_resources())),
                },
                Some("tasks") => print_frame(work_items_frame(context.work_items())),
                Some("results") => match context.last_run() {
                    Some(run) => print_frame(results_frame(&run.results)),
                    None => println!("No scheduling run yet. Use 'run'."),
                },
                Some("log") => match context.last_run() {
                    Some(run) => {
                        for entry in &run.log {
                            println!("{}", entry);
                        }
                    }
                    None => println!("No scheduling run yet. Use 'run'."),
                },
                Some("config") => print_config(&context),
                _ => println!("Usage: show resources|initial|tasks|results|log|config"),
            },
            "run" => {
                let reference_date = match parts.next() {
                    Some(date_s) => match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                        Ok(d) => d,
                        Err(_) => {
                            println!("Invalid date (YYYY-MM-DD)");
                            continue;
                        }
                    },
                    None => Local::now().date_naive(),
                };
                let run = context.run(reference_date);
                println!(
                    "Scheduled {} work items from {}.",
                    run.results.len(),
                    reference_date
                );
                for entry in &run.log {
                    println!("{}", entry);
                }
                print_frame(results_frame(&run.results));
            }
            "save" => match (parts.next(), parts.next(), parts.next()) {
                (Some("plan"), Some(path), None) => {
                    match save_plan_to_json(&context.plan(), path) {
                        Ok(_) => println!("Plan saved to {}.", path),
                        Err(e) => println!("Error saving plan: {}", e),
                    }
                }
                (Some("results"), Some(fmt), Some(path)) => {
                    let Some(run) = context.last_run() else {
                        println!("No scheduling run yet. Use 'run'.");
                        continue;
                    };
                    let saved = match fmt {
                        "json" => save_results_to_json(&run.results, path),
                        "csv" => save_results_to_csv(&run.results, path),
                        _ => {
                            println!("Usage: save results <json|csv> <path>");
                            continue;
                        }
                    };
                    match saved {
                        Ok(_) => println!("Results saved to {}.", path),
                        Err(e) => println!("Error saving results: {}", e),
                    }
                }
                _ => println!("Usage: save plan <json> | save results <json|csv> <path>"),
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
