//! Prompt construction for suspect dialogue.
//!
//! Builds the system persona, the per-question user prompt, and the canned
//! fallback used when the dialogue service gives no clean reply. The system
//! prompt is the only place outside the evaluator that reads the solution:
//! the killer has to know the truth in order to lie about it.

use sleuthr_domain::{Case, Clue, QuestionType, Speaker, Suspect, TranscriptEntry};

use crate::infrastructure::ports::ChatMessage;

/// Most recent transcript turns forwarded to the model as chat history.
const HISTORY_WINDOW: usize = 6;

/// The in-character persona prompt for one suspect.
pub fn build_system_prompt(case: &Case, suspect: &Suspect, discovered: &[&Clue]) -> String {
    let is_killer = suspect.id == case.solution.killer_id;

    let mut prompt = format!(
        "You are {name}, {occupation}, a suspect in the murder of {victim}. \
         The victim was found in the {found_in} around {time}.\n\
         Personality: {personality}\n\
         Relationship to the victim: {relationship}\n\
         Your alibi: {alibi}\n",
        name = suspect.name,
        occupation = suspect.occupation,
        victim = case.victim.name,
        found_in = case.victim.found_in,
        time = case.victim.time_of_death,
        personality = suspect.personality,
        relationship = suspect.relationship,
        alibi = suspect.alibi,
    );

    if !suspect.secrets.is_empty() {
        prompt.push_str("Secrets you hide unless cornered:\n");
        for secret in &suspect.secrets {
            prompt.push_str(&format!("- {secret}\n"));
        }
    }

    if is_killer {
        prompt.push_str(
            "\nYou ARE the killer. You know exactly what happened, and you will \
             never confess. Deflect, minimize, and cast suspicion elsewhere, but \
             stay consistent with your alibi and grow defensive when the \
             detective's evidence comes close to the truth.\n",
        );
    } else {
        prompt.push_str(
            "\nYou are innocent. You do not know who the killer is. Answer from \
             what you genuinely know, protect your own secrets, and share honest \
             suspicions if pressed.\n",
        );
    }

    if !discovered.is_empty() {
        prompt.push_str("\nEvidence the detective has already found:\n");
        for clue in discovered {
            prompt.push_str(&format!("- {}: {}\n", clue.name, clue.description));
        }
    }

    prompt.push_str(
        "\nStay in character. Answer in one to three sentences of spoken dialogue, \
         no narration or stage directions.",
    );
    prompt
}

/// The user-turn prompt for one question.
pub fn build_user_prompt(question: QuestionType, suspect: &Suspect, clue: Option<&Clue>) -> String {
    match question {
        QuestionType::Whereabouts => {
            "The detective asks where you were at the time of the murder.".to_string()
        }
        QuestionType::Relationship => {
            "The detective asks about your relationship with the victim.".to_string()
        }
        QuestionType::Evidence => match clue {
            Some(clue) => format!(
                "The detective shows you a piece of evidence - {}: {}. Explain yourself.",
                clue.name, clue.description
            ),
            None => "The detective gestures at the evidence gathered so far.".to_string(),
        },
        QuestionType::Accusation => format!(
            "The detective looks {name} in the eye and accuses them of the murder. React.",
            name = suspect.name
        ),
    }
}

/// Format the tail of a transcript as chat history for the model.
pub fn build_history(history: &[TranscriptEntry]) -> Vec<ChatMessage> {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|entry| match entry.speaker {
            Speaker::Player => {
                let topic = entry
                    .question
                    .map(|q| format!("{q:?}").to_lowercase())
                    .unwrap_or_else(|| "the case".to_string());
                ChatMessage::user(format!("Detective asks about: {topic}"))
            }
            Speaker::Suspect => ChatMessage::assistant(entry.text.clone()),
        })
        .collect()
}

/// The canned evasive reply used when the dialogue service fails.
pub fn fallback_response(suspect: &Suspect) -> String {
    format!(
        "{} seems evasive and doesn't give a clear answer.",
        suspect.name
    )
}
