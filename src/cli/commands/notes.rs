use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ensure_writable, export_xlsx, job_notes_table};
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Notes {
        list,
        job,
        set,
        export,
        force,
    } = cmd
    {
        let store = open_store(cfg)?;

        match (job, set) {
            (Some(job), Some(text)) => {
                store.save_job_notes(job, text)?;
                if text.is_empty() {
                    success(format!("Notes for job {job} removed."));
                } else {
                    success(format!("Notes for job {job} saved."));
                }
            }
            (Some(job), None) => {
                let notes = store.job_notes_get(job)?;
                if notes.is_empty() {
                    info(format!("No notes for job {job}."));
                } else {
                    println!("{notes}");
                }
            }
            _ => {}
        }

        if *list {
            let notes = store.job_notes_list()?;
            if notes.is_empty() {
                info("No job notes stored.");
            } else {
                let job_w = notes.keys().map(|k| k.len()).max().unwrap_or(0).max(10);
                let mut table = Table::new(vec![
                    Column {
                        header: "Job Number".to_string(),
                        width: job_w,
                    },
                    Column {
                        header: "Notes".to_string(),
                        width: 40,
                    },
                ]);
                for (job, text) in &notes {
                    table.add_row(vec![job.clone(), text.replace('\n', " ")]);
                }
                print!("{}", table.render());
            }
        }

        if let Some(file) = export {
            let path = Path::new(file);
            ensure_writable(path, *force)?;
            let table = job_notes_table(&store.job_notes_list()?)?;
            export_xlsx(&table, path)?;
        }
    }

    Ok(())
}
