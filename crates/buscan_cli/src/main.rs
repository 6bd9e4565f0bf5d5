//! `buscan` command-line entry point.
//!
//! # Responsibility
//! - Translate commands into fleet service calls.
//! - Turn core errors into one-line messages and a non-zero exit code.

mod cli;

use anyhow::{anyhow, bail, Context, Result};
use buscan_core::{
    core_version, default_log_level, init_logging, insert_stop, move_stop, remove_stop,
    BusUpdate, CoreConfig, FleetItemRequest, FleetService, JsonFileStore, MoveDirection,
};
use cli::{
    BusCommand, CommandLine, Commands, DirectionArg, FleetCommand, RouteCommand, StopCommand,
};
use log::info;
use std::path::Path;

type Service = FleetService<JsonFileStore>;

fn main() {
    let commands = CommandLine::parse_args();
    if let Err(err) = run(commands) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(commands: CommandLine) -> Result<()> {
    if let Some(log_dir) = &commands.log_dir {
        start_logging(log_dir, commands.log_level.as_deref())?;
    }

    let config = match &commands.config {
        Some(path) => CoreConfig::from_path(path)?,
        None => CoreConfig::default(),
    };
    let service = FleetService::with_config(JsonFileStore::new(&commands.data), config)?;
    info!(
        "event=cli_start module=cli status=ok data={}",
        commands.data.display()
    );

    match commands.command {
        Commands::Bus(command) => run_bus(&service, command),
        Commands::Route(command) => run_route(&service, command),
        Commands::Fleet(command) => run_fleet(&service, command),
        Commands::Check => run_check(&service),
        Commands::Version => {
            println!("buscan_core version={}", core_version());
            Ok(())
        }
    }
}

fn start_logging(log_dir: &Path, level: Option<&str>) -> Result<()> {
    let log_dir = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to resolve current directory")?
            .join(log_dir)
    };
    let level = level.unwrap_or(default_log_level());
    init_logging(level, &log_dir).map_err(|err| anyhow!("{err}"))
}

fn run_bus(service: &Service, command: BusCommand) -> Result<()> {
    match command {
        BusCommand::Add {
            number,
            capacity,
            route,
        } => {
            let bus = service.create_bus(&number, capacity, route.as_deref())?;
            println!("created bus {} ({})", number.trim(), bus.state);
        }
        BusCommand::Update {
            number,
            capacity,
            state,
            route,
            clear_route,
        } => {
            let route = if clear_route { Some(None) } else { route.map(Some) };
            let update = BusUpdate {
                capacity,
                state,
                route,
            };
            let bus = service.update_bus(&number, &update)?;
            println!(
                "updated bus {}: capacity={} state={} route={}",
                number.trim(),
                bus.capacity,
                bus.state,
                bus.route_name().unwrap_or("-")
            );
        }
        BusCommand::Delete { number } => {
            if service.delete_bus(&number)? {
                println!("deleted bus {}", number.trim());
            } else {
                println!("bus {} was not registered", number.trim());
            }
        }
        BusCommand::List => {
            let document = service.load_document()?;
            if document.buses.is_empty() {
                println!("no buses registered");
            }
            for (number, bus) in &document.buses {
                let route = match bus.route_name() {
                    Some(name) if document.route(name).is_some() => name.to_string(),
                    Some(name) => format!("{name} (missing)"),
                    None => "-".to_string(),
                };
                println!(
                    "{number}\tcapacity={}\tstate={}\tpassengers={}\troute={route}",
                    bus.capacity, bus.state, bus.passengers
                );
            }
        }
    }
    Ok(())
}

fn run_route(service: &Service, command: RouteCommand) -> Result<()> {
    match command {
        RouteCommand::Add { name, stops } => {
            let route = service.create_route(&name, stops)?;
            println!(
                "created route {} with {} stops",
                name.trim(),
                route.stop_count()
            );
        }
        RouteCommand::Update {
            name,
            new_name,
            stops,
        } => {
            let target = new_name.unwrap_or_else(|| name.clone());
            let route = service.rename_or_update_route(&name, &target, stops)?;
            println!(
                "saved route {} with {} stops",
                target.trim(),
                route.stop_count()
            );
        }
        RouteCommand::Delete { name } => {
            if service.delete_route(&name)? {
                println!("deleted route {}", name.trim());
            } else {
                println!("route {} did not exist", name.trim());
            }
        }
        RouteCommand::List => {
            let summaries = service.route_summaries()?;
            if summaries.is_empty() {
                println!("no routes registered");
            }
            for summary in summaries {
                let status = if summary.is_active { "" } else { "\tinactive" };
                println!("{}\tstops={}{status}", summary.name, summary.stop_count);
            }
        }
        RouteCommand::Show { name } => {
            let stops = service
                .route_stops(&name)?
                .ok_or_else(|| anyhow!("route not found: {}", name.trim()))?;
            for (index, stop) in stops.iter().enumerate() {
                println!("{index}\t{stop}");
            }
        }
        RouteCommand::Stop(command) => run_stop(service, command)?,
    }
    Ok(())
}

fn run_stop(service: &Service, command: StopCommand) -> Result<()> {
    let route = match &command {
        StopCommand::Insert { route, .. }
        | StopCommand::Remove { route, .. }
        | StopCommand::Move { route, .. } => route.clone(),
    };
    let mut stops = service
        .route_stops(&route)?
        .ok_or_else(|| anyhow!("route not found: {}", route.trim()))?;

    match command {
        StopCommand::Insert { stop, at, .. } => insert_stop(&mut stops, stop, at),
        StopCommand::Remove { index, .. } => {
            if remove_stop(&mut stops, index).is_none() {
                bail!("route {} has no stop at index {index}", route.trim());
            }
        }
        StopCommand::Move {
            index, direction, ..
        } => {
            let direction = match direction {
                DirectionArg::Up => MoveDirection::Up,
                DirectionArg::Down => MoveDirection::Down,
            };
            if move_stop(&mut stops, index, direction).is_none() {
                println!("stop {index} is already at the edge; nothing to move");
                return Ok(());
            }
        }
    }

    let route_record = service.update_route_stops(&route, stops)?;
    println!(
        "route {} now has {} stops",
        route.trim(),
        route_record.stop_count()
    );
    Ok(())
}

fn run_fleet(service: &Service, command: FleetCommand) -> Result<()> {
    match command {
        FleetCommand::Save(args) => {
            let request = FleetItemRequest {
                name: args.name,
                quantity: args.quantity,
                capacity: args.capacity,
                route: args.route,
                previous_name: args.previous_name,
            };
            let item = service.save_fleet_item(&request)?;
            println!(
                "saved fleet item {}: quantity={} capacity={} total={}",
                request.name.trim(),
                item.quantity,
                item.capacity,
                item.total_capacity()
            );
        }
        FleetCommand::Delete { name } => {
            if service.delete_fleet_item(&name)? {
                println!("deleted fleet item {}", name.trim());
            } else {
                println!("fleet item {} did not exist", name.trim());
            }
        }
        FleetCommand::List => {
            let fleet = service.list_fleet()?;
            if fleet.is_empty() {
                println!("no fleet items registered");
            }
            for (name, item) in fleet {
                println!(
                    "{name}\tquantity={}\tcapacity={}\troute={}",
                    item.quantity,
                    item.capacity,
                    item.route.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

fn run_check(service: &Service) -> Result<()> {
    let dangling = service.dangling_references()?;
    if dangling.is_empty() {
        println!("all route assignments resolve");
        return Ok(());
    }
    for reference in &dangling {
        println!(
            "{} {} references missing route {}",
            reference.owner, reference.owner_id, reference.route
        );
    }
    Ok(())
}
