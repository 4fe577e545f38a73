//! Terminal host for a single editable row.
//!
//! Each stdin line replaces the row's text. Lines starting with `:` are
//! commands: `:begin`, `:commit`, `:cancel`, `:return`, `:teardown`,
//! `:diag`, `:quit`.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Sender};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;

use rowedit::cli::CliArgs;
use rowedit::update::update;
use rowedit::{
    CharacterCount, EditMsg, EditingConfiguration, EditingDelegate, EditingSession, ThreadTimer,
    ValidationError,
};

/// Events arriving on the main loop
enum HostEvent {
    Line(String),
    Msg(EditMsg),
    Eof,
}

/// Prints every session event to stdout
struct ConsoleHost;

impl EditingDelegate for ConsoleHost {
    fn on_begin(&mut self) {
        println!("[begin]");
    }

    fn on_validation_failed(&mut self, error: &ValidationError) {
        println!("[invalid] {}", error);
    }

    fn on_character_count_changed(&mut self, count: CharacterCount) {
        match (count.count, count.remaining) {
            (Some(n), Some(left)) => println!("[count] {} ({} left)", n, left),
            (Some(n), None) => println!("[count] {}", n),
            (None, Some(left)) => println!("[count] {} left", left),
            (None, None) => {}
        }
    }

    fn on_auto_save(&mut self, text: &str) {
        println!("[auto-save] {:?}", text);
    }

    fn on_end(&mut self, final_text: &str) {
        println!("[end] {:?}", final_text);
    }
}

fn spawn_stdin_reader(tx: Sender<HostEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(HostEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(HostEvent::Eof);
    });
}

fn main() -> Result<()> {
    rowedit::tracing::init();

    let args = CliArgs::parse();
    let initial = args.initial.clone();
    let config = args
        .into_config()
        .context("Failed to resolve editing configuration")?;

    let (timer, ticks) = ThreadTimer::new();
    let mut session = EditingSession::new(ConsoleHost, timer);

    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx.clone());
    thread::spawn(move || {
        for handle in ticks {
            if tx.send(HostEvent::Msg(EditMsg::AutoSaveTick(handle))).is_err() {
                return;
            }
        }
    });

    let begin = |text: String, config: &EditingConfiguration| EditMsg::BeginEditing {
        initial_text: text,
        config: config.clone(),
    };
    update(&mut session, begin(initial, &config));

    for event in rx {
        let msg = match event {
            HostEvent::Msg(msg) => msg,
            HostEvent::Eof => break,
            HostEvent::Line(line) => match line.as_str() {
                ":quit" => break,
                ":begin" => begin(session.current_text().to_string(), &config),
                ":commit" => EditMsg::CommitRequested,
                ":cancel" => EditMsg::CancelRequested,
                ":return" => EditMsg::ReturnKeyPressed,
                ":teardown" => EditMsg::Teardown,
                ":diag" => {
                    for error in session.diagnostics() {
                        println!("[diag] #{} {}", error.rule_index, error);
                    }
                    continue;
                }
                _ => EditMsg::TextDidChange(line),
            },
        };
        update(&mut session, msg);
    }

    update(&mut session, EditMsg::Teardown);
    println!("{}", session.current_text());
    Ok(())
}
