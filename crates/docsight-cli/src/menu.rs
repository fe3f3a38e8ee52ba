//! Interactive document source picker.

use std::io::{self, BufRead, Write};
use std::path::Path;

use docsight_ingest::list_documents;

/// Ask the user for a document source and return a path or URL.
///
/// Invalid answers re-prompt; closed input is an `UnexpectedEof` error.
pub fn choose_document<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    docs_dir: &Path,
) -> io::Result<String> {
    loop {
        writeln!(out, "Choose a document source:")?;
        writeln!(out, "1) Document from the test folder ({})", docs_dir.display())?;
        writeln!(out, "2) Enter a path to a file (PDF/DOCX)")?;
        writeln!(out, "3) Enter a URL to a file (e.g. GitHub)")?;

        match prompt(input, out, "Your choice: ")?.as_str() {
            "1" => {
                let docs = list_documents(docs_dir);
                if docs.is_empty() {
                    writeln!(out, "No documents found in {}", docs_dir.display())?;
                    continue;
                }

                writeln!(out, "\nAvailable documents:")?;
                for (idx, path) in docs.iter().enumerate() {
                    let name = path.file_name().unwrap_or_default().to_string_lossy();
                    writeln!(out, "{}) {}", idx + 1, name)?;
                }

                loop {
                    let answer = prompt(input, out, "Document number: ")?;
                    match answer.parse::<usize>() {
                        Ok(n) if (1..=docs.len()).contains(&n) => {
                            return Ok(docs[n - 1].to_string_lossy().into_owned());
                        }
                        Ok(_) => writeln!(out, "Invalid number. Try again.")?,
                        Err(_) => writeln!(out, "Enter a valid number.")?,
                    }
                }
            }
            "2" => return prompt(input, out, "Path to file (PDF/DOCX): "),
            "3" => return prompt(input, out, "URL to file: "),
            _ => writeln!(out, "Invalid choice. Enter 1, 2 or 3.")?,
        }
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<String> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}
