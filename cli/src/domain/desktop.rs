//! XDG desktop entry text for the installed program.

use std::fmt::Write as _;
use std::path::Path;

/// Launcher for a program registered inside a bottle.
#[derive(Debug, Clone, Copy)]
pub struct DesktopEntry<'a> {
    /// Program display name, as registered in the bottle.
    pub name: &'a str,
    pub app_id: &'a str,
    pub bottle_id: &'a str,
    pub icon: &'a Path,
}

impl DesktopEntry<'_> {
    /// Render the `.desktop` file contents, one key per line.
    ///
    /// The main action re-enters `bottles-cli run` for the program; the
    /// `Configure` action opens the Bottles window for the bottle.
    #[must_use]
    pub fn render(&self) -> String {
        let Self {
            name,
            app_id,
            bottle_id,
            icon,
        } = *self;
        let lines = [
            "[Desktop Entry]".to_string(),
            format!("Name={name}"),
            format!(
                "Exec=flatpak run --command=bottles-cli {app_id} run -p '{name}' -b '{bottle_id}' -- %u"
            ),
            "Type=Application".to_string(),
            "Terminal=false".to_string(),
            "Categories=Application;".to_string(),
            format!("Icon={}", icon.display()),
            format!("Comment=Launch {name} using Bottles."),
            format!("StartupWMClass={name}"),
            "Actions=Configure;".to_string(),
            "[Desktop Action Configure]".to_string(),
            "Name=Configure in Bottles".to_string(),
            format!("Exec=flatpak run {app_id} -b '{bottle_id}'"),
        ];
        lines.iter().fold(String::new(), |mut out, line| {
            let _ = writeln!(out, "{line}");
            out
        })
    }
}
