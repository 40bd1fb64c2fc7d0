//! The `lexiquiz play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lexiquiz_core::config::{load_config_from, QuizConfig};
use lexiquiz_core::model::Direction;
use lexiquiz_core::parser::parse_word_table;
use lexiquiz_core::report::SessionReport;
use lexiquiz_core::repository::WordRepository;
use lexiquiz_core::session::SessionController;
use lexiquiz_report::html::{write_html_report, RenderOptions};
use lexiquiz_report::links::dictionary_link;

pub struct PlayArgs {
    pub words: Option<PathBuf>,
    pub count: Option<usize>,
    pub direction: Option<String>,
    pub seed: Option<u64>,
    pub no_delay: bool,
    pub output: PathBuf,
    pub format: String,
    pub config: Option<PathBuf>,
}

/// How a session loop ended.
#[derive(Debug, PartialEq, Eq)]
enum SessionEnd {
    Finished,
    Abandoned,
}

/// What the player typed at the answer prompt.
#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Answer(String),
    Toggle,
    Quit,
    Invalid,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let path = super::resolve_word_list(args.words, config.word_list.as_deref())?;

    let word_count = args.count.unwrap_or(config.word_count);
    anyhow::ensure!(word_count >= 1, "word count must be at least 1");

    let direction = match &args.direction {
        Some(d) => d.parse::<Direction>().map_err(|e| anyhow::anyhow!("{e}"))?,
        None => config.direction,
    };

    let formats: Vec<&str> = if args.format == "all" {
        vec!["text", "json", "html"]
    } else {
        args.format.split(',').map(str::trim).collect()
    };
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "text" | "json" | "html"),
            "unknown format: '{fmt}' (expected text, json, html, or all)"
        );
    }

    let table = parse_word_table(&path, &config.table)?;
    if !table.dropped.is_empty() {
        eprintln!(
            "Warning: skipped {} incomplete row(s) in {}",
            table.dropped.len(),
            path.display()
        );
    }
    let repository = Arc::new(WordRepository::from_table(table)?);
    tracing::debug!(
        "loaded {} words in {} categories from {}",
        repository.len(),
        repository.categories().len(),
        path.display()
    );

    let controller = match args.seed.or(config.seed) {
        Some(seed) => SessionController::with_seed(direction, seed),
        None => SessionController::new(direction),
    }
    .with_distractor_count(config.distractor_count);

    let delay = if args.no_delay {
        Duration::ZERO
    } else {
        Duration::from_millis(config.reveal_delay_ms)
    };

    let mut game = Game {
        controller,
        config: &config,
        delay,
        input: io::stdin().lock(),
        out: io::stdout().lock(),
    };

    loop {
        match game.play_session(Arc::clone(&repository), word_count)? {
            SessionEnd::Finished => {
                let report = game.controller.report()?;
                game.print_report(&report)?;
                save_reports(&report, &config, &formats, &args.output)?;
            }
            SessionEnd::Abandoned => {
                writeln!(game.out, "\nSession abandoned.")?;
                return Ok(());
            }
        }

        write!(game.out, "\nPlay again? [y/N] ")?;
        game.out.flush()?;
        match game.read_line()? {
            Some(line) if line.trim().eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }

    Ok(())
}

/// The terminal presentation layer around a session controller.
struct Game<'a, I, W> {
    controller: SessionController,
    config: &'a QuizConfig,
    delay: Duration,
    input: I,
    out: W,
}

impl<I: BufRead, W: Write> Game<'_, I, W> {
    fn play_session(
        &mut self,
        repository: Arc<WordRepository>,
        word_count: usize,
    ) -> Result<SessionEnd> {
        let start = self.controller.start(repository, word_count)?;
        if let Some(warning) = &start.warning {
            writeln!(self.out, "Warning: {warning}")?;
        }

        let (from, to) = self.config.languages.for_direction(start.direction);
        writeln!(self.out, "\n{from} → {to} ({} words)", start.drawn)?;
        writeln!(
            self.out,
            "Type the option number. 't' switches direction for the next session, 'q' quits."
        )?;

        while !self.controller.is_finished() {
            self.print_stats()?;
            let round = self.controller.current_round().clone();

            writeln!(self.out, "\n  {}\n", round.prompt)?;
            for (i, option) in round.options.iter().enumerate() {
                writeln!(self.out, "  {}) {}", i + 1, option)?;
            }

            let selected = loop {
                write!(self.out, "> ")?;
                self.out.flush()?;
                let Some(line) = self.read_line()? else {
                    self.controller.abandon();
                    return Ok(SessionEnd::Abandoned);
                };
                match parse_choice(&line, &round.options) {
                    Choice::Answer(answer) => break answer,
                    Choice::Toggle => {
                        let next = self.controller.toggle_direction();
                        let (from, to) = self.config.languages.for_direction(next);
                        writeln!(self.out, "Direction for the next session: {from} → {to}")?;
                    }
                    Choice::Quit => {
                        self.controller.abandon();
                        return Ok(SessionEnd::Abandoned);
                    }
                    Choice::Invalid => {
                        writeln!(
                            self.out,
                            "Pick a number between 1 and {}.",
                            round.options.len()
                        )?;
                    }
                }
            };

            let outcome = self.controller.submit_answer(&selected);
            if outcome.correct {
                writeln!(self.out, "Correct!")?;
            } else {
                writeln!(
                    self.out,
                    "Wrong. The correct answer is: {}",
                    outcome.correct_answer
                )?;
            }

            if !self.delay.is_zero() && !self.controller.is_finished() {
                self.out.flush()?;
                std::thread::sleep(self.delay);
            }
        }

        self.print_stats()?;
        Ok(SessionEnd::Finished)
    }

    fn print_stats(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "\nRemaining: {} | Correct: {} | Incorrect: {}",
            self.controller.remaining_count(),
            self.controller.correct_count(),
            self.controller.incorrect_count()
        )?;
        Ok(())
    }

    fn print_report(&mut self, report: &SessionReport) -> Result<()> {
        let (from, to) = self.config.languages.for_direction(report.direction);

        writeln!(self.out, "\nFinal score: {:.2}", report.score)?;

        let mut table = Table::new();
        table.set_header(vec![from, to, "Example", "Dictionary"]);
        for row in &report.review {
            let link = dictionary_link(&self.config.dictionary_url, &row.external_link_slug)
                .unwrap_or_default();
            table.add_row(vec![
                Cell::new(&row.prompt),
                Cell::new(&row.answer),
                Cell::new(&row.example),
                Cell::new(link),
            ]);
        }

        writeln!(self.out, "\nWords in this session\n{table}")?;
        Ok(())
    }

    /// Next line of input, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

fn parse_choice(line: &str, options: &[String]) -> Choice {
    let line = line.trim();
    match line {
        "t" | "T" => return Choice::Toggle,
        "q" | "Q" => return Choice::Quit,
        _ => {}
    }

    if let Ok(n) = line.parse::<usize>() {
        return match n.checked_sub(1).and_then(|i| options.get(i)) {
            Some(option) => Choice::Answer(option.clone()),
            None => Choice::Invalid,
        };
    }

    options
        .iter()
        .find(|o| o.as_str() == line)
        .map(|o| Choice::Answer(o.clone()))
        .unwrap_or(Choice::Invalid)
}

fn save_reports(
    report: &SessionReport,
    config: &QuizConfig,
    formats: &[&str],
    output: &std::path::Path,
) -> Result<()> {
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let short_id: String = report.id.to_string().chars().take(8).collect();

    for fmt in formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("report-{timestamp}-{short_id}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}-{short_id}.html"));
                let options = RenderOptions {
                    dictionary_url: config.dictionary_url.clone(),
                    languages: config.languages.clone(),
                };
                write_html_report(report, &options, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {}
        }
    }

    Ok(())
}
