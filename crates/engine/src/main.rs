//! Terminal front end for the investigation engine.
//!
//! A thin line-oriented harness: every command maps onto one session
//! operation and prints the resulting state. All rules live in the domain;
//! this loop only parses words and formats text.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use sleuthr_domain::{Accusation, ClueId, Phase, QuestionType, RoomId, SuspectId, WeaponId};
use sleuthr_engine::{App, AskOutcome, GameSession};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = App::from_env();
    let session = app.new_game.execute()?;
    session.begin().await?;

    let case = session.case();
    println!("=== {} ===\n", case.title);
    println!("{}\n", case.introduction);
    println!(
        "The body of {} was found in the {}, {}.",
        case.victim.name, case.victim.found_in, case.victim.time_of_death
    );
    println!("You have {} actions. Type 'help' for commands.\n", case.max_actions);
    print_room(&session).await;

    let stdin = std::io::stdin();
    let mut input = String::new();
    let mut result_shown = false;
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "help" => print_help(),
            "look" => print_room(&session).await,
            "go" => match args.first() {
                Some(room) => {
                    match session.enter_room(RoomId::new(*room)).await {
                        Ok(()) => print_room(&session).await,
                        Err(e) => println!("{e}"),
                    }
                }
                None => println!("Usage: go <room>"),
            },
            "examine" => match args.first() {
                Some(clue) => examine(&session, clue).await,
                None => println!("Usage: examine <clue>"),
            },
            "talk" => match args.first() {
                Some(suspect) => match session.start_interview(SuspectId::new(*suspect)).await {
                    Ok(()) => println!("You sit down across from {}.", suspect_name(&session, suspect)),
                    Err(e) => println!("{e}"),
                },
                None => println!("Usage: talk <suspect>"),
            },
            "leave" => match session.end_interview().await {
                Ok(()) => print_room(&session).await,
                Err(e) => println!("{e}"),
            },
            "ask" => match args.first().and_then(|w| QuestionType::parse(w)) {
                Some(QuestionType::Evidence) => match args.get(1) {
                    Some(clue) => {
                        ask(&session, QuestionType::Evidence, Some(ClueId::new(*clue))).await
                    }
                    None => println!("Usage: ask evidence <clue>"),
                },
                Some(question) => ask(&session, question, None).await,
                None => println!("Usage: ask <whereabouts|relationship|evidence <clue>|accusation>"),
            },
            "evidence" => print_evidence(&session).await,
            "accuse" => match (args.first(), args.get(1), args.get(2)) {
                (Some(suspect), Some(weapon), Some(room)) => {
                    accuse(&session, suspect, weapon, room).await
                }
                _ => println!("Usage: accuse <suspect> <weapon> <room>"),
            },
            "status" => print_status(&session).await,
            "new" => {
                session.reset().await;
                session.begin().await?;
                result_shown = false;
                println!("A fresh case file lands on your desk.\n");
                print_room(&session).await;
            }
            "quit" | "exit" => break,
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }

        // Print the result exactly once, when the phase first turns terminal.
        let state = session.snapshot().await;
        if state.phase() == Phase::Result && !result_shown {
            if let Some(outcome) = state.outcome() {
                result_shown = true;
                println!("\n=== {} ===\n", outcome.headline);
                println!("{}\n", outcome.narrative);
                println!("Type 'new' for another case or 'quit' to leave.");
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  look                     describe the current room");
    println!("  go <room>                move to another room");
    println!("  examine <clue>           search the room for a clue");
    println!("  talk <suspect>           interview a suspect in this room");
    println!("  ask <question> [clue]    whereabouts, relationship, evidence <clue>, accusation");
    println!("  leave                    end the interview");
    println!("  evidence                 review discovered clues");
    println!("  accuse <s> <w> <r>       make the final accusation");
    println!("  status                   actions remaining and progress");
    println!("  new                      start over with a fresh case");
    println!("  quit                     give up and go home");
}

async fn print_room(session: &Arc<GameSession>) {
    let state = session.snapshot().await;
    let case = session.case();
    let Some(room) = state.current_room().and_then(|id| case.room(id)) else {
        return;
    };

    println!("-- {} --", room.name);
    println!("{}", room.description);

    let present: Vec<&str> = case
        .suspects_in_room(&room.id)
        .map(|s| s.id.as_str())
        .collect();
    if !present.is_empty() {
        println!("Here: {}", present.join(", "));
    }
    if !room.clue_ids.is_empty() {
        let spots: Vec<&str> = room.clue_ids.iter().map(|c| c.as_str()).collect();
        println!("Worth examining: {}", spots.join(", "));
    }
    if !room.connected_rooms.is_empty() {
        let doors: Vec<&str> = room.connected_rooms.iter().map(|r| r.as_str()).collect();
        println!("Doors lead to: {}", doors.join(", "));
    }
}

async fn examine(session: &Arc<GameSession>, clue: &str) {
    let clue_id = ClueId::new(clue);
    match session.discover_clue(clue_id.clone()).await {
        Ok(newly) => {
            if let Some(clue) = session.case().clue(&clue_id) {
                if newly {
                    println!("Found: {}", clue.name);
                } else {
                    println!("You already catalogued: {}", clue.name);
                }
                println!("{}", clue.description);
            }
        }
        Err(e) => println!("You find nothing. ({e})"),
    }
}

async fn ask(session: &Arc<GameSession>, question: QuestionType, clue_id: Option<ClueId>) {
    let suspect = session
        .snapshot()
        .await
        .current_suspect()
        .map(|id| suspect_name(session, id.as_str()))
        .unwrap_or_else(|| "The suspect".to_string());

    match session.ask_question(question, clue_id).await {
        Ok(AskOutcome::Reply(message)) => {
            println!("You: {}", question.player_line());
            println!("{suspect}: {message}");
            let remaining = session.snapshot().await.actions_remaining();
            println!("({remaining} actions left)");
        }
        // The result screen prints from the main loop.
        Ok(AskOutcome::GameOver(_)) => {}
        Err(e) => println!("{e}"),
    }
}

async fn print_evidence(session: &Arc<GameSession>) {
    if let Err(e) = session.open_evidence().await {
        println!("{e}");
        return;
    }
    let state = session.snapshot().await;
    let case = session.case();

    if state.discovered_clues().is_empty() {
        println!("Your case file is empty.");
    } else {
        println!("Case file:");
        for id in state.discovered_clues() {
            if let Some(clue) = case.clue(id) {
                println!(
                    "  [{}] {} ({}): {}",
                    id,
                    clue.name,
                    clue.category.display_name(),
                    clue.description
                );
            }
        }
    }
    if session.has_sufficient_evidence().await {
        println!("You have enough to make an accusation stick.");
    }
    // Overlay closes immediately; this front end has no modal screens.
    let _ = session.close_evidence().await;
}

async fn accuse(session: &Arc<GameSession>, suspect: &str, weapon: &str, room: &str) {
    if let Err(e) = session.open_accusation().await {
        println!("{e}");
        return;
    }
    if !session.has_sufficient_evidence().await {
        println!("(Your evidence is thin, but you press on.)");
    }
    let accusation = Accusation {
        suspect_id: SuspectId::new(suspect),
        weapon_id: WeaponId::new(weapon),
        location_id: RoomId::new(room),
    };
    match session.make_accusation(&accusation).await {
        // The result screen prints from the main loop.
        Ok(_) => {}
        Err(e) => {
            println!("{e}");
            let _ = session.close_accusation().await;
        }
    }
}

async fn print_status(session: &Arc<GameSession>) {
    let state = session.snapshot().await;
    let case = session.case();
    println!("Actions remaining: {}", state.actions_remaining());
    println!(
        "Clues discovered: {}/{}",
        state.discovered_clues().len(),
        case.clues.len()
    );
    println!(
        "Suspects interviewed: {}/{}",
        state.interviewed_suspects().len(),
        case.suspects.len()
    );
}

fn suspect_name(session: &Arc<GameSession>, id: &str) -> String {
    session
        .case()
        .suspect(&SuspectId::new(id))
        .map(|s| s.name.clone())
        .unwrap_or_else(|| id.to_string())
}
