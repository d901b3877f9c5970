//! Command dispatch: load settings, build the tree, run the subcommand.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{
    format_order, render_layers, render_tree, ApplicationError, LayeredGraph,
};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::menu::run_menu;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{NodeId, SearchMethod, Tree, TreeBuilder, TreeError};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    // Commands that need no tree
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Config {
            command: ConfigCommands::Template,
        }) => {
            output::info(&Settings::template());
            return Ok(());
        }
        _ => {}
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let mut builder = tree_builder(cli, &settings);
    let method = builder.method();
    debug!(%method, "effective search method");

    let tree = builder
        .build(&settings.tree)
        .map_err(ApplicationError::from)?;

    match &cli.command {
        None | Some(Commands::Menu) => _menu(&tree, &settings),
        Some(Commands::Order) => _order(&tree, method),
        Some(Commands::Search { label }) => _search(&tree, label, method),
        Some(Commands::Distance { from, to }) => _distance(&tree, from, to, method),
        Some(Commands::Depth { label }) => _depth(&tree, label.as_deref(), method),
        Some(Commands::Show) => _show(&tree, &settings),
        Some(Commands::Layers) => _layers(&tree, &settings),
        Some(Commands::Config {
            command: ConfigCommands::Show,
        }) => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        Some(Commands::Config {
            command: ConfigCommands::Template,
        })
        | Some(Commands::Completion { .. }) => Ok(()),
    }
}

/// Builder using the `--method` flag, falling back to the configured method.
fn tree_builder(cli: &Cli, settings: &Settings) -> TreeBuilder {
    TreeBuilder::new().with_method(cli.method.unwrap_or(settings.method))
}

/// Resolve a label to the first matching node in `method` order.
fn resolve(tree: &Tree<String>, label: &str, method: SearchMethod) -> CliResult<NodeId> {
    tree.search(label, method)
        .ok_or_else(|| ApplicationError::LabelNotFound(label.to_string()).into())
}

#[instrument(skip_all)]
fn _menu(tree: &Tree<String>, settings: &Settings) -> CliResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    run_menu(tree, &settings.palette, &mut input, &mut stdout)
}

#[instrument(skip(tree))]
fn _order(tree: &Tree<String>, method: SearchMethod) -> CliResult<()> {
    output::header(&format!("Tree order ({}):", method));
    output::info(&format_order(tree, &tree.order(method)));
    Ok(())
}

#[instrument(skip(tree))]
fn _search(tree: &Tree<String>, label: &str, method: SearchMethod) -> CliResult<()> {
    match tree.search(label, method) {
        Some(id) => {
            let depth = tree.distance_between(tree.root(), id).unwrap_or_default();
            output::action("found", &format!("{} at depth {}", label, depth));
        }
        None => output::warning(&format!("not found: {}", label)),
    }
    Ok(())
}

#[instrument(skip(tree))]
fn _distance(tree: &Tree<String>, from: &str, to: &str, method: SearchMethod) -> CliResult<()> {
    let from_id = resolve(tree, from, method)?;
    let to_id = resolve(tree, to, method)?;
    match tree.distance_between(Some(from_id), to_id) {
        Some(d) => output::info(&d),
        None => output::warning(&format!("no path from {} down to {}", from, to)),
    }
    Ok(())
}

#[instrument(skip(tree))]
fn _depth(tree: &Tree<String>, label: Option<&str>, method: SearchMethod) -> CliResult<()> {
    let id = match label {
        Some(label) => resolve(tree, label, method)?,
        None => tree
            .root()
            .ok_or_else(|| ApplicationError::from(TreeError::NoRoot))?,
    };
    let depth = tree
        .depth(id)
        .ok_or_else(|| ApplicationError::from(TreeError::UnknownNode(id)))?;
    output::info(&depth);
    Ok(())
}

#[instrument(skip_all)]
fn _show(tree: &Tree<String>, settings: &Settings) -> CliResult<()> {
    let graph = LayeredGraph::from_tree(tree, &settings.palette)?;
    match render_tree(tree, &graph)? {
        Some(drawing) => output::info(&drawing),
        None => output::warning("tree has no root"),
    }
    Ok(())
}

#[instrument(skip_all)]
fn _layers(tree: &Tree<String>, settings: &Settings) -> CliResult<()> {
    let graph = LayeredGraph::from_tree(tree, &settings.palette)?;
    match graph.height() {
        Some(height) => output::header(&format!("Layers 0..={}:", height)),
        None => output::warning("tree has no root"),
    }
    output::info(&render_layers(&graph));
    Ok(())
}
