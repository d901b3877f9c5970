//! Interactive text menu printing traversal results.

use std::fmt::Display;
use std::io::{BufRead, Write};

use tracing::{debug, instrument};

use crate::application::{format_order, render_tree, LayeredGraph};
use crate::cli::error::{CliError, CliResult};
use crate::domain::{SearchMethod, Tree};

const MENU: &str = "\
====== Blind search in trees ======

Note: the tree is configured with --config or the global config file

Select an option:
1: Show tree
2: Show breadth-first order (BFS)
3: Show depth-first order (DFS)
0: Exit
";

/// Reads one line; None on EOF.
fn read_line<R: BufRead>(input: &mut R) -> CliResult<Option<String>> {
    let mut line = String::new();
    let n = input
        .read_line(&mut line)
        .map_err(|e| CliError::io("read menu input", e))?;
    Ok((n > 0).then(|| line.trim().to_string()))
}

/// Returns false when input is exhausted.
fn wait_enter<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> CliResult<bool> {
    write!(output, "Press ENTER to continue...").map_err(write_err)?;
    output.flush().map_err(write_err)?;
    let more = read_line(input)?.is_some();
    // Spacing between one menu and the next
    write!(output, "\n\n\n").map_err(write_err)?;
    Ok(more)
}

fn write_err(e: std::io::Error) -> CliError {
    CliError::io("write menu output", e)
}

fn print_order<T: Display, W: Write>(
    tree: &Tree<T>,
    method: SearchMethod,
    output: &mut W,
) -> CliResult<()> {
    let title = match method {
        SearchMethod::Bfs => "Tree order using breadth-first search (BFS):",
        SearchMethod::Dfs => "Tree order using depth-first search (DFS):",
    };
    writeln!(output, "{}", title).map_err(write_err)?;
    writeln!(output, "{}", format_order(tree, &tree.order(method))).map_err(write_err)?;
    Ok(())
}

/// Runs the menu loop until `0` is entered or input ends.
#[instrument(level = "debug", skip_all)]
pub fn run_menu<T, R, W>(
    tree: &Tree<T>,
    palette: &[String],
    input: &mut R,
    output: &mut W,
) -> CliResult<()>
where
    T: Display,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}\n> ", MENU).map_err(write_err)?;
        output.flush().map_err(write_err)?;

        let Some(choice) = read_line(input)? else {
            debug!("menu input exhausted");
            writeln!(output).map_err(write_err)?;
            return Ok(());
        };
        writeln!(output).map_err(write_err)?;
        debug!(%choice, "menu selection");

        let more = match choice.as_str() {
            "0" => return Ok(()),
            "1" => {
                writeln!(output, "Showing tree...").map_err(write_err)?;
                let graph = LayeredGraph::from_tree(tree, palette)?;
                if let Some(drawing) = render_tree(tree, &graph)? {
                    write!(output, "{}", drawing).map_err(write_err)?;
                }
                true
            }
            "2" => {
                print_order(tree, SearchMethod::Bfs, output)?;
                wait_enter(input, output)?
            }
            "3" => {
                print_order(tree, SearchMethod::Dfs, output)?;
                wait_enter(input, output)?
            }
            _ => {
                writeln!(output, "Option not recognised.").map_err(write_err)?;
                wait_enter(input, output)?
            }
        };
        if !more {
            return Ok(());
        }
    }
}
