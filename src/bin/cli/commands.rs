//! CLI command implementations: plain-text rendering over the library

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;

use engram::backup;
use engram::decay::{compute_decay, DecayCurve};
use engram::library::LibraryStorage;
use engram::stats::{dashboard_stats, format_drop_eta, format_study_time};
use engram::training::{
    Outcome, Phase, RandomPicker, SessionPolicy, TrainingSession, WordDisplay,
};

// ==================== Folders ====================

pub fn folder_add(storage: &LibraryStorage, name: &str) -> Result<()> {
    let folder = storage.create_folder(name)?;
    println!("Created folder '{}'", folder.name);
    Ok(())
}

pub fn folder_rename(storage: &LibraryStorage, name: &str, new_name: &str) -> Result<()> {
    storage.rename_folder(name, new_name)?;
    println!("Renamed '{}' to '{}'", name, new_name);
    Ok(())
}

pub fn folder_rm(storage: &LibraryStorage, name: &str) -> Result<()> {
    storage.delete_folder(name)?;
    println!("Deleted folder '{}' and its cards", name);
    Ok(())
}

pub fn folder_list(storage: &LibraryStorage) -> Result<()> {
    let document = storage.load()?;
    if document.folders.is_empty() {
        println!("No folders yet. Create one with `folder add <name>`.");
        return Ok(());
    }
    for folder in &document.folders {
        println!("{}  ({} cards)", folder.name, folder.cards.len());
    }
    Ok(())
}

// ==================== Cards ====================

pub fn card_add(storage: &LibraryStorage, folder: &str, title: &str, text: &str) -> Result<()> {
    let card = storage.create_card(folder, title, text, Utc::now())?;
    println!("Created card {} '{}' in '{}'", card.id, card.title, folder);
    Ok(())
}

pub fn card_edit(storage: &LibraryStorage, id: i64, title: &str, text: &str) -> Result<()> {
    let card = storage.update_card(id, title, text)?;
    println!("Updated card {} '{}' (level {}/10)", card.id, card.title, card.level);
    Ok(())
}

pub fn card_rm(storage: &LibraryStorage, id: i64) -> Result<()> {
    storage.delete_card(id)?;
    println!("Deleted card {}", id);
    Ok(())
}

pub fn card_show(storage: &LibraryStorage, id: i64) -> Result<()> {
    let card = storage.get_card(id)?;
    let curve = DecayCurve::default();
    let decay = compute_decay(card.level, card.last_studied_at, Utc::now(), &curve);

    println!("{} (id {})", card.title, card.id);
    println!("  level:      {}/10 (stability {:.1}%)", decay.effective_level, decay.stability_percent);
    if decay.ms_until_next_drop > 0 {
        println!("  next drop:  {}", format_drop_eta(decay.ms_until_next_drop));
    } else {
        println!("  next drop:  — study now");
    }
    println!("  winrate:    {}%", card.winrate);
    println!("  study time: {}", format_study_time(card.study_seconds));
    println!();
    println!("{}", card.text);
    Ok(())
}

pub fn card_list(storage: &LibraryStorage, folder_name: &str) -> Result<()> {
    let document = storage.load()?;
    let curve = DecayCurve::default();
    let now = Utc::now();

    let folder = document
        .folders
        .iter()
        .find(|f| f.name == folder_name)
        .ok_or_else(|| anyhow::anyhow!("Folder '{}' not found", folder_name))?;

    if folder.cards.is_empty() {
        println!("No cards in '{}'.", folder.name);
        return Ok(());
    }
    for card in &folder.cards {
        let decay = compute_decay(card.level, card.last_studied_at, now, &curve);
        println!("[{:>2}/10]  {}  {}", decay.effective_level, card.id, card.title);
    }
    Ok(())
}

// ==================== Dashboard ====================

pub fn dashboard(storage: &LibraryStorage) -> Result<()> {
    let document = storage.load()?;
    let curve = DecayCurve::default();
    let stats = dashboard_stats(&document, Utc::now(), &curve);

    println!(
        "Cards: {}  |  critical {}  attention {}  safe {}  |  total study {}",
        stats.total_cards,
        stats.critical,
        stats.attention,
        stats.safe,
        format_study_time(stats.total_study_seconds)
    );

    if !stats.folder_averages.is_empty() {
        println!("\nFolder averages:");
        for folder in &stats.folder_averages {
            println!("  {:<24} {:.2}/10", folder.name, folder.mean_exact_level);
        }
    }

    if !stats.urgency.is_empty() {
        println!("\nMost urgent:");
        for entry in stats.urgency.iter().take(6) {
            let eta = if entry.needs_study {
                "study now!".to_string()
            } else {
                format!("drops in {}", format_drop_eta(entry.ms_until_next_drop))
            };
            println!(
                "  {:.2}/10  {:<28} [{}]  {}",
                entry.exact_level, entry.title, entry.folder, eta
            );
        }
    }
    Ok(())
}

// ==================== Training ====================

pub fn train(storage: &LibraryStorage, id: i64) -> Result<()> {
    let card = storage.get_card(id)?;
    let curve = DecayCurve::default();
    let decay = compute_decay(card.level, card.last_studied_at, Utc::now(), &curve);

    let mut picker = RandomPicker;
    let mut session = TrainingSession::start(
        &card,
        decay.effective_level,
        &curve,
        SessionPolicy::default(),
        &mut picker,
    );

    println!("Training '{}' — effective level {}/10", card.title, decay.effective_level);
    println!("Type the blanked words. :hint shows the text (with penalty), :quit discards.\n");

    let started = Instant::now();
    let stdin = io::stdin();

    loop {
        session.set_elapsed_seconds(started.elapsed().as_secs());
        render_session(&session);
        if session.is_complete() {
            break;
        }

        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!("\nSession discarded; nothing was saved.");
            return Ok(());
        }

        match line.trim() {
            ":quit" | ":q" => {
                println!("Session discarded; nothing was saved.");
                return Ok(());
            }
            ":hint" => {
                println!("--- full text (penalty applied) ---");
                println!("{}", session.reveal_hint());
                println!("--- press Enter to restart from erosion ---");
                let mut ack = String::new();
                stdin.lock().read_line(&mut ack)?;
                session.dismiss_hint(&mut picker);
            }
            attempt => match session.submit_attempt(attempt, &mut picker) {
                Outcome::Correct => {}
                Outcome::Ignored => {}
                Outcome::Incorrect => println!("  x wrong ({} errors)", session.error_count()),
                Outcome::RoundComplete => println!("  + round done, one more gap"),
                Outcome::ErosionComplete => println!("  + erosion done — full blind recall"),
                Outcome::CycleComplete { cycle } => {
                    println!("  + cycle done, starting {}/{}", cycle, session.target_cycles())
                }
                Outcome::SessionComplete => {}
            },
        }
    }

    session.set_elapsed_seconds(started.elapsed().as_secs());
    let record = session.completion(Utc::now());
    let updated = storage.apply_completion(session.card_id(), &record)?;
    println!(
        "\nSession complete! Level {}/10, winrate {}%, time {}",
        updated.level,
        record.winrate,
        format_study_time(record.seconds)
    );
    Ok(())
}

fn render_session(session: &TrainingSession) {
    let phase = match session.phase() {
        Phase::Erosion => format!(
            "Erosion ({}/{} hidden)",
            session.occluded_count(),
            session.content_count()
        ),
        Phase::Consolidation { cycle } => {
            format!("Consolidation ({}/{})", cycle, session.target_cycles())
        }
        Phase::Complete => "Complete".to_string(),
    };

    let line: Vec<String> = session
        .word_views()
        .iter()
        .map(|view| match view.display {
            WordDisplay::Blank => "_".repeat(view.original.chars().count().max(3)),
            _ => view.original.to_string(),
        })
        .collect();

    println!(
        "\n[{}]  progress {:.0}%  accuracy {}%  {}",
        phase,
        session.progress_percent(),
        session.accuracy_percent(),
        format_study_time(session.elapsed_seconds())
    );
    println!("{}", line.join(" "));
}

// ==================== Backup ====================

pub fn export(storage: &LibraryStorage, path: &Path) -> Result<()> {
    let document = storage.load()?;
    backup::export_document(&document, path)?;
    println!("Exported {} card(s) to {}", document.card_count(), path.display());
    Ok(())
}

pub fn import(storage: &LibraryStorage, path: &Path) -> Result<()> {
    let document = backup::import_document(path)?;
    let document = storage.replace(document)?;
    println!("Imported {} card(s) from {}", document.card_count(), path.display());
    Ok(())
}
