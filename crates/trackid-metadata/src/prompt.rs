// SPDX-License-Identifier: GPL-3.0-or-later

use std::io;

/// User interaction needed by the Discogs authorization flow.
///
/// The library never touches the terminal itself; callers supply a console
/// implementation, tests supply a scripted one.
pub trait InteractivePrompt: Send + Sync {
    /// Show an informational message.
    fn message(&self, text: &str);

    /// Ask a question and return one line of input, without the line ending.
    fn read_line(&self, question: &str) -> io::Result<String>;

    /// Open `url` in the user's browser.
    fn open_url(&self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }
}
