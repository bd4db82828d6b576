use std::io::{self, BufRead, Write};

/// The prompt shown before each line
pub static PROMPT: &str = "> ";

/// Read headlines from `input` until EOF or `exit`, writing one rendered result per headline.
/// Blank lines are skipped.
pub fn run<R, W, F>(mut input: R, mut output: W, mut analyze: F) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> String,
{
    writeln!(output, "Enter a headline to analyze, or 'exit' to quit.")?;

    let mut analyzed = 0;
    let mut line = String::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let headline = line.trim();

        if headline.eq_ignore_ascii_case("exit") {
            break;
        }

        if headline.is_empty() {
            continue;
        }

        writeln!(output, "{}", analyze(headline))?;
        analyzed += 1;
    }

    Ok(analyzed)
}
