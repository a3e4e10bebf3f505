//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use crate::record::PersonRecord;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use warmpath_domain::Person;
use warmpath_engine::{Candidate, IntroductionPath};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format person records.
    pub fn format_persons(&self, persons: &[Person]) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let records: Vec<PersonRecord> =
                    persons.iter().map(PersonRecord::from_person).collect();
                Ok(serde_json::to_string_pretty(&records)?)
            }
            CliFormat::Table => Ok(self.format_persons_table(persons)),
            CliFormat::Quiet => Ok(persons
                .iter()
                .map(|p| p.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a single person.
    pub fn format_person(&self, person: &Person) -> Result<String> {
        self.format_persons(std::slice::from_ref(person))
    }

    fn format_persons_table(&self, persons: &[Person]) -> String {
        if persons.is_empty() {
            return self.colorize("No persons found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Employer", "Title", "Deleted"]);

        for person in persons {
            builder.push_record([
                person.id.as_str(),
                &person.name,
                person.employer.as_deref().unwrap_or("-"),
                person.title.as_deref().unwrap_or("-"),
                if person.deleted { "yes" } else { "" },
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format resolved target candidates.
    pub fn format_candidates(&self, candidates: &[Candidate]) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let values: Vec<serde_json::Value> = candidates
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "person": PersonRecord::from_person(&c.person),
                            "confidence": c.confidence,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            CliFormat::Table => {
                if candidates.is_empty() {
                    return Ok(self.colorize("No matching persons.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Employer", "Confidence"]);
                for c in candidates {
                    builder.push_record([
                        c.person.id.as_str(),
                        &c.person.name,
                        c.person.employer.as_deref().unwrap_or("-"),
                        &format!("{:.2}", c.confidence),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            CliFormat::Quiet => Ok(candidates
                .iter()
                .map(|c| c.person.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format ranked introduction paths.
    ///
    /// Table mode renders each path as `alice -(coworker)-> bob
    /// -(hometown)-> carol`.
    pub fn format_paths(&self, paths: &[IntroductionPath]) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let values: Vec<serde_json::Value> = paths
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "persons": p.persons.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                            "kinds": p.kinds.iter().map(|k| k.as_str()).collect::<Vec<_>>(),
                            "hops": p.hops,
                            "total_strength": p.total_strength,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            CliFormat::Table => {
                if paths.is_empty() {
                    return Ok(self.colorize("No introduction paths found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Path", "Hops", "Strength"]);
                for (rank, path) in paths.iter().enumerate() {
                    builder.push_record([
                        &(rank + 1).to_string(),
                        &render_chain(path),
                        &path.hops.to_string(),
                        &path.total_strength.to_string(),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            CliFormat::Quiet => Ok(paths
                .iter()
                .map(|p| {
                    p.persons
                        .iter()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render_chain(path: &IntroductionPath) -> String {
    let mut out = String::new();
    for (i, id) in path.persons.iter().enumerate() {
        if i > 0 {
            let kind = path
                .kinds
                .get(i - 1)
                .map(|k| k.as_str())
                .unwrap_or("?");
            out.push_str(&format!(" -({})-> ", kind));
        }
        out.push_str(id.as_str());
    }
    out
}
