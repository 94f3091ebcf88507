pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    pub fn help_text(&self) -> String {
        r#"Keyboard Shortcuts:

Fields:
  Tab / Shift+Tab   Next / previous field
  Click             Focus a field or press Generate

Editor:
  Arrows, Home, End Move the cursor
  Ctrl + F          Format JSON

Logo:
  Enter             Load the file path (or data: URL) typed in the logo field
  Enter on empty    Clear the selected logo
  Enter in Company  Look up a logo for the company
  Ctrl + L          Look up a logo for the editor's "customer"
  Ctrl + Y          Use the suggested logo
  Ctrl + N          Dismiss the suggested logo

Generate:
  Ctrl + G          Generate the agenda
  Enter on button   Generate the agenda

General:
  F1                Toggle this help
  ?                 Toggle this help (on the Generate button)
  Ctrl + H          Toggle this help (some terminals send it as Backspace)
  Shift + E         Show latest error details (on the Generate button)
  Click status bar  Show latest error details
  Esc               Dismiss the oldest notice
  Ctrl + Q          Quit
"#
        .to_string()
    }
}
