#![allow(clippy::unbuffered_bytes)]

use std::io::{self, Read, Write};

use heapless::String;
use scpi_core::Node;
use scpi_macros::scpi_tree;

/// Prompt displayed while waiting for a command line.
const PROMPT: &str = "scpi> ";

/// Upper bound for one input line; longer lines are rejected, not grown.
const INPUT_MAX_LEN: usize = 128;

/// Lines resolved once at startup to show the matching rules.
const DEMO_LINES: &[&str] = &[
    "sEnS:currEnt",
    "sEnS:voltage 100V",
    "sEnS:voltage?",
    "sEnSor:voltage",
    "sEnSor:PoW:voltage",
    "SENSOR:PoWer:voltage",
    "SENS:FREQ 10MHz",
];

fn build_tree() -> Node {
    scpi_tree! {
        SENSor {
            [POWer] {
                CURRent => usercode::commands::current,
                VOLTage => usercode::commands::voltage,
            }
        }
    }
}

fn main() {
    let tree = build_tree();

    run_demo(&tree);

    println!();
    println!("⚡ Interactive mode: ':' separates levels, ';' separates commands");
    println!("   Type 'help' for the command list, 'exit' to quit");

    let mut line = String::<INPUT_MAX_LEN>::new();
    loop {
        print!("{}", PROMPT);
        let _ = io::stdout().flush();
        if !read_line(&mut line) {
            break;
        }
        match line.trim() {
            "" => {}
            "exit" | "quit" => break,
            "help" => list_commands(&tree),
            input => report(&tree, input),
        }
    }
    println!("⛔ Exited...");
}

/// Feeds a few canned lines through the tree to show abbreviation, case
/// folding, optional levels, queries and no-match handling.
fn run_demo(tree: &Node) {
    println!("⚡ Matching single commands:");
    for line in DEMO_LINES {
        match tree.match_segment(line) {
            Some(result) => println!("✅ '{}' matched: {}", line, result),
            None => println!("❌ '{}' did not match", line),
        }
    }

    println!();
    println!("⚡ Dispatching a command sequence:");
    tree.parse("sEnS:voltage 100V;sEnS:current 0.2ma");
}

/// Resolves every command of the line and prints the outcome. Handler
/// output appears above the report line of its command.
fn report(tree: &Node, line: &str) {
    for command in line.split(';') {
        match tree.match_segment(command) {
            Some(result) => println!("✅ Matched: {}", result),
            None => println!("❌ No match for '{}'", command),
        }
    }
}

/// Prints every addressable path of the tree.
fn list_commands(tree: &Node) {
    println!("⚡ Commands:");
    for path in tree.paths() {
        println!("  {}", path);
    }
}

/// Reads one line from stdin into the bounded buffer. Returns `false` on
/// end of input. A line that does not fit in the buffer is dropped with a
/// warning instead of being grown.
fn read_line(line: &mut String<INPUT_MAX_LEN>) -> bool {
    line.clear();
    let mut overflow = false;
    for byte in io::stdin().bytes() {
        let byte = match byte {
            Ok(byte) => byte,
            Err(_) => return false,
        };
        match byte {
            b'\n' => {
                if overflow {
                    println!("⚠️ Line longer than {} characters, ignored", INPUT_MAX_LEN);
                    line.clear();
                }
                return true;
            }
            b'\r' => {}
            byte if valid_byte(byte) => {
                if line.push(byte as char).is_err() {
                    overflow = true;
                }
            }
            _ => {}
        }
    }
    !line.is_empty() && !overflow
}

/// Accepts printable ASCII and space, the character set of command lines.
fn valid_byte(b: u8) -> bool {
    b == b' ' || b.is_ascii_graphic()
}
