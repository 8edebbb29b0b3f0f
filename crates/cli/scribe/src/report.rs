//! Diagnostic rendering

use sc_driver::FileSyntaxErrors;

/// Prints every syntax error with its source context and returns how many
/// were printed
pub fn render_syntax_errors(files: &[FileSyntaxErrors]) -> usize {
    let mut count = 0;
    for file in files {
        for error in &file.errors {
            eprintln!("{:?}", miette::Report::new(error.clone()));
            count += 1;
        }
    }
    count
}
