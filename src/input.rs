//! Interactive collection of the user's download choices.
//!
//! Terminal I/O sits behind the [`Prompter`] trait so the collection logic
//! can be driven from scripted input in tests.

use std::io::{self, BufRead, Stdout, Write};

use console::style;

use crate::downloader::errors::InputError;
use crate::downloader::models::{ContentKind, MediaLink, MediaRequest, Resolution, UserIntent};

/// Entering this ends link collection
pub const STOP_SENTINEL: &str = "STOP";

/// Source of answers for the collector.
pub trait Prompter {
    /// Ask the user to pick one of `choices`; returns its index.
    fn select(&mut self, message: &str, choices: &[&str]) -> Result<usize, InputError>;

    /// Ask for one line of free text, trimmed.
    fn text(&mut self, message: &str) -> Result<String, InputError>;

    /// Show a message that needs no answer.
    fn notify(&mut self, message: &str) -> Result<(), InputError>;
}

/// Line-oriented prompter over any reader/writer pair.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl LinePrompter<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String, InputError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Aborted);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn select(&mut self, message: &str, choices: &[&str]) -> Result<usize, InputError> {
        writeln!(self.output, "{} {}", style("?").green(), style(message).bold())?;
        for (idx, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", idx + 1, choice)?;
        }

        loop {
            write!(self.output, "Choice [1-{}]: ", choices.len())?;
            self.output.flush()?;

            let answer = self.read_line()?;
            if let Ok(n) = answer.parse::<usize>() {
                if (1..=choices.len()).contains(&n) {
                    return Ok(n - 1);
                }
            }
            if let Some(idx) = choices.iter().position(|c| c.eq_ignore_ascii_case(&answer)) {
                return Ok(idx);
            }

            writeln!(
                self.output,
                "Please enter a number between 1 and {}.",
                choices.len()
            )?;
        }
    }

    fn text(&mut self, message: &str) -> Result<String, InputError> {
        write!(self.output, "{} {}: ", style("?").green(), style(message).bold())?;
        self.output.flush()?;
        self.read_line()
    }

    fn notify(&mut self, message: &str) -> Result<(), InputError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

fn prompt_request(prompter: &mut dyn Prompter) -> Result<MediaRequest, InputError> {
    let kinds: Vec<&str> = ContentKind::ALL.iter().map(|k| k.label()).collect();
    let kind = ContentKind::ALL[prompter.select(
        "Select the type of content you want to download",
        &kinds,
    )?];

    match kind {
        ContentKind::Audio => Ok(MediaRequest::Audio),
        ContentKind::Video => {
            let labels: Vec<&str> = Resolution::ALL.iter().map(|r| r.label()).collect();
            let idx = prompter.select("Select the resolution of downloaded videos", &labels)?;
            Ok(MediaRequest::Video(Resolution::ALL[idx]))
        }
    }
}

/// Read links until the sentinel, keeping only syntactically valid ones.
pub fn prompt_links(prompter: &mut dyn Prompter) -> Result<Vec<MediaLink>, InputError> {
    let mut links = Vec::new();

    loop {
        let entry = prompter.text("Enter a YouTube video link or enter STOP to continue")?;

        if entry == STOP_SENTINEL {
            break;
        }
        if entry.is_empty() {
            continue;
        }

        // Validate the value just read, before it is kept
        match MediaLink::parse(&entry) {
            Some(link) => links.push(link),
            None => {
                tracing::debug!("rejected link input: {}", entry);
                let notice = format!("The link you entered is invalid ({})!", entry);
                prompter.notify(&style(notice).red().to_string())?;
            }
        }
    }

    Ok(links)
}

/// Run the whole prompt sequence.
pub fn collect(prompter: &mut dyn Prompter) -> Result<UserIntent, InputError> {
    let request = prompt_request(prompter)?;
    let links = prompt_links(prompter)?;
    Ok(UserIntent { request, links })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(lines: &[&str]) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        let mut script = lines.join("\n");
        script.push('\n');
        LinePrompter::new(Cursor::new(script.into_bytes()), Vec::new())
    }

    fn links_of(intent: &UserIntent) -> Vec<&str> {
        intent.links.iter().map(|l| l.as_str()).collect()
    }

    #[test]
    fn video_flow_collects_resolution_and_links() {
        let mut p = scripted(&["1", "3", "https://valid.example/watch?v=1", "STOP"]);
        let intent = collect(&mut p).unwrap();

        assert_eq!(intent.request, MediaRequest::Video(Resolution::P1080));
        assert_eq!(links_of(&intent), vec!["https://valid.example/watch?v=1"]);
    }

    #[test]
    fn audio_flow_skips_resolution_prompt() {
        let mut p = scripted(&["2", "https://a.example/x", "STOP"]);
        let intent = collect(&mut p).unwrap();

        assert_eq!(intent.request, MediaRequest::Audio);
        assert_eq!(intent.resolution(), None);
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(!out.contains("resolution"));
    }

    #[test]
    fn choices_accept_labels() {
        let mut p = scripted(&["audio", "STOP"]);
        assert_eq!(collect(&mut p).unwrap().request, MediaRequest::Audio);

        let mut p = scripted(&["Video", "720P", "STOP"]);
        assert_eq!(
            collect(&mut p).unwrap().request,
            MediaRequest::Video(Resolution::P720)
        );
    }

    #[test]
    fn out_of_range_choice_reprompts() {
        let mut p = scripted(&["0", "9", "two", "2", "STOP"]);
        assert_eq!(collect(&mut p).unwrap().request, MediaRequest::Audio);
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out.matches("Please enter a number between 1 and 2.").count(), 3);
    }

    #[test]
    fn invalid_links_are_reported_and_dropped() {
        let mut p = scripted(&[
            "2",
            "not a url",
            "https://valid.example/watch?v=1",
            "ftp//broken",
            "https://valid.example/watch?v=2",
            "STOP",
        ]);
        let intent = collect(&mut p).unwrap();

        assert_eq!(
            links_of(&intent),
            vec![
                "https://valid.example/watch?v=1",
                "https://valid.example/watch?v=2"
            ]
        );
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("invalid (not a url)"));
        assert!(out.contains("invalid (ftp//broken)"));
    }

    #[test]
    fn invalid_entry_after_valid_one_is_still_rejected() {
        // First entry is valid, so checking anything but the latest value would let this through
        let mut p = scripted(&["2", "https://ok.example/1", "garbage", "STOP"]);
        let intent = collect(&mut p).unwrap();
        assert_eq!(links_of(&intent), vec!["https://ok.example/1"]);
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let mut p = scripted(&[
            "2",
            "https://b.example/2",
            "https://a.example/1",
            "https://b.example/2",
            "STOP",
        ]);
        let intent = collect(&mut p).unwrap();
        assert_eq!(
            links_of(&intent),
            vec!["https://b.example/2", "https://a.example/1", "https://b.example/2"]
        );
    }

    #[test]
    fn immediate_stop_gives_empty_links() {
        let mut p = scripted(&["2", "STOP"]);
        assert!(collect(&mut p).unwrap().links.is_empty());
    }

    #[test]
    fn blank_lines_are_ignored_and_sentinel_is_trimmed() {
        let mut p = scripted(&["2", "", "  https://a.example/1  ", "   ", " STOP "]);
        let intent = collect(&mut p).unwrap();
        assert_eq!(links_of(&intent), vec!["https://a.example/1"]);
    }

    #[test]
    fn lowercase_stop_is_not_the_sentinel() {
        let mut p = scripted(&["2", "stop", "STOP"]);
        let intent = collect(&mut p).unwrap();
        assert!(intent.links.is_empty());
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("invalid (stop)"));
    }

    #[test]
    fn eof_aborts() {
        let mut p = LinePrompter::new(Cursor::new(Vec::new()), Vec::new());
        assert!(matches!(collect(&mut p), Err(InputError::Aborted)));

        let script = b"1\n3\nhttps://a.example/1\n".to_vec();
        let mut p = LinePrompter::new(Cursor::new(script), Vec::new());
        assert!(matches!(collect(&mut p), Err(InputError::Aborted)));
    }

    #[test]
    fn output_never_contains_sentinel_or_invalid_values() {
        let entries = [
            "https://a.example/1",
            "nope",
            "http://",
            "https://b.example/2?x=1",
            "javascript:alert(1)",
            "STOPP",
            "https://c.example",
        ];
        let mut script = vec!["2"];
        script.extend(entries.iter());
        script.push("STOP");

        let mut p = scripted(&script);
        let intent = collect(&mut p).unwrap();

        let expected: Vec<&str> = entries
            .iter()
            .copied()
            .filter(|e| MediaLink::parse(e).is_some())
            .collect();
        assert_eq!(links_of(&intent), expected);
        assert!(intent.links.iter().all(|l| l.as_str() != STOP_SENTINEL));
        assert_eq!(expected.len(), 3);
    }
}
