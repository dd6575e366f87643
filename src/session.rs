//! Dialog session: configuration, argument construction, and child-process
//! invocation of the whiptail utility.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::item::{resolve_flags, ListItem};

/// Exit codes whiptail reports: 0 = confirmed, 1 = negative answer,
/// 255 = escaped. 1 and 255 both mean the user backed out of most dialogs.
const DEFAULT_CANCEL_CODES: &[i32] = &[1, 255];

/// For yes/no boxes exit code 1 is the legitimate "No" answer, so only
/// escape counts as cancellation.
const YESNO_CANCEL_CODES: &[i32] = &[255];

/// Rows whiptail's chrome consumes around a list: borders, buttons,
/// padding.
const CHROME_ROWS: i32 = 7;

/// What happens when a dialog exits with a code in its cancel set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelPolicy {
    /// Terminate the whole process with the dialog's exit code. An
    /// abandoned dialog abandons the program; callers never see the
    /// cancellation.
    #[default]
    ExitProcess,
    /// Return [`Error::Cancelled`] carrying the exit code for the caller
    /// to inspect.
    Propagate,
}

/// Which button a yes/no box highlights initially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultButton {
    #[default]
    Yes,
    No,
}

/// One invocation's outcome: the child's exit code and whatever it wrote
/// to stderr, which is where whiptail places the user's answer.
struct Response {
    code: i32,
    payload: Vec<u8>,
}

/// A configured dialog session.
///
/// Holds the display settings shared by every dialog it shows. The session
/// is read-only once built: displaying a dialog never mutates it, and each
/// invocation spawns exactly one child process and blocks until it exits.
#[derive(Debug, Clone)]
pub struct Whiptail {
    title: String,
    backtitle: String,
    height: u16,
    width: u16,
    cancel_policy: CancelPolicy,
    debug: bool,
    program: String,
}

impl Default for Whiptail {
    fn default() -> Self {
        Self {
            title: String::new(),
            backtitle: String::new(),
            height: 10,
            width: 50,
            cancel_policy: CancelPolicy::default(),
            debug: false,
            program: "whiptail".to_string(),
        }
    }
}

impl Whiptail {
    /// A session with whiptail's conventional defaults: no titles, a
    /// 10x50 box, and process exit on cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Title shown in the dialog's top border.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Secondary title shown on the screen backdrop.
    pub fn backtitle(mut self, backtitle: impl Into<String>) -> Self {
        self.backtitle = backtitle.into();
        self
    }

    /// Dialog size in rows and columns.
    pub fn size(mut self, height: u16, width: u16) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    pub fn cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    /// Log the full constructed command line at debug level before each
    /// invocation.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the executable name. Useful for the argument-compatible
    /// `dialog` program, or an absolute path when whiptail is not on PATH.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Single-line text entry. Returns the entered text.
    pub fn inputbox(&self, msg: &str) -> Result<String> {
        self.inputbox_with_default(msg, "")
    }

    /// Single-line text entry with the field pre-filled.
    pub fn inputbox_with_default(&self, msg: &str, default: &str) -> Result<String> {
        let resp = self.invoke(
            "inputbox",
            msg,
            vec![default.to_string()],
            DEFAULT_CANCEL_CODES,
        )?;
        Ok(String::from_utf8(resp.payload)?)
    }

    /// Like [`inputbox`](Self::inputbox) but the input is masked.
    pub fn passwordbox(&self, msg: &str) -> Result<String> {
        self.passwordbox_with_default(msg, "")
    }

    pub fn passwordbox_with_default(&self, msg: &str, default: &str) -> Result<String> {
        let resp = self.invoke(
            "passwordbox",
            msg,
            vec![default.to_string()],
            DEFAULT_CANCEL_CODES,
        )?;
        Ok(String::from_utf8(resp.payload)?)
    }

    /// Yes/no confirmation. Returns true iff the user chose Yes.
    ///
    /// Exit code 1 is the "No" answer here, not a cancellation, so only
    /// escape (255) is subject to the cancel policy.
    pub fn yesno(&self, msg: &str) -> Result<bool> {
        self.yesno_with_default(msg, DefaultButton::Yes)
    }

    pub fn yesno_with_default(&self, msg: &str, default: DefaultButton) -> Result<bool> {
        let extra = match default {
            DefaultButton::Yes => Vec::new(),
            DefaultButton::No => vec!["--defaultno".to_string()],
        };
        let resp = self.invoke("yesno", msg, extra, YESNO_CANCEL_CODES)?;
        Ok(resp.code == 0)
    }

    /// Message box with a single OK button.
    pub fn msgbox(&self, msg: &str) -> Result<()> {
        self.invoke("msgbox", msg, Vec::new(), DEFAULT_CANCEL_CODES)?;
        Ok(())
    }

    /// Display the contents of the file at `path` in a scrollable box.
    pub fn textbox(&self, path: &Path) -> Result<()> {
        self.invoke(
            "textbox",
            &path.display().to_string(),
            vec!["--scrolltext".to_string()],
            DEFAULT_CANCEL_CODES,
        )?;
        Ok(())
    }

    /// Single-choice menu. Returns the key of the selected entry.
    ///
    /// Keyed entries get `" - "` between key and description; use
    /// [`menu_with_prefix`](Self::menu_with_prefix) to change that.
    pub fn menu<I>(&self, msg: &str, items: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Into<ListItem>,
    {
        self.menu_with_prefix(msg, items, " - ")
    }

    pub fn menu_with_prefix<I>(&self, msg: &str, items: I, prefix: &str) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Into<ListItem>,
    {
        let items: Vec<ListItem> = items.into_iter().map(Into::into).collect();
        let extra = build_menu_extra(&items, prefix);
        let resp = self.invoke("menu", msg, extra, DEFAULT_CANCEL_CODES)?;
        Ok(String::from_utf8(resp.payload)?)
    }

    /// Single-choice list with radio buttons. Returns the selected keys
    /// (zero or one of them).
    pub fn radiolist<I>(&self, msg: &str, items: I) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: Into<ListItem>,
    {
        self.radiolist_with(msg, items, "", None)
    }

    pub fn radiolist_with<I>(
        &self,
        msg: &str,
        items: I,
        prefix: &str,
        defaults: Option<&[bool]>,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: Into<ListItem>,
    {
        self.show_list("radiolist", msg, items, prefix, defaults)
    }

    /// Multi-choice checklist. Returns the keys of every checked entry.
    pub fn checklist<I>(&self, msg: &str, items: I) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: Into<ListItem>,
    {
        self.checklist_with(msg, items, "", None)
    }

    pub fn checklist_with<I>(
        &self,
        msg: &str,
        items: I,
        prefix: &str,
        defaults: Option<&[bool]>,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: Into<ListItem>,
    {
        self.show_list("checklist", msg, items, prefix, defaults)
    }

    fn show_list<I>(
        &self,
        kind: &str,
        msg: &str,
        items: I,
        prefix: &str,
        defaults: Option<&[bool]>,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: Into<ListItem>,
    {
        let items: Vec<ListItem> = items.into_iter().map(Into::into).collect();
        let list_height = self.list_height(msg, items.len());
        let extra = build_list_extra(list_height, &items, prefix, defaults);
        let resp = self.invoke(kind, msg, extra, DEFAULT_CANCEL_CODES)?;
        let text = String::from_utf8(resp.payload)?;
        // Checklist selections come back as quoted shell words.
        Ok(shell_words::split(&text)?)
    }

    /// Rows the list itself may occupy inside the configured dialog height,
    /// after reserving space for the wrapped message text and whiptail's
    /// chrome.
    ///
    /// Goes negative when the configured height cannot even fit the chrome;
    /// the value is passed through unclamped and whiptail's own fallback
    /// sizing takes over.
    fn list_height(&self, msg: &str, item_count: usize) -> i32 {
        let msg_height = if msg.is_empty() {
            0
        } else {
            let chars = msg.chars().count() as i32;
            let width = i32::from(self.width);
            (chars + width - 1) / width
        };
        let remaining = i32::from(self.height) - (msg_height + CHROME_ROWS);
        (item_count as i32).min(remaining)
    }

    /// Run one dialog and wait for its exit.
    ///
    /// stdin and stdout stay attached to the terminal (whiptail draws
    /// there); stderr is piped and carries the answer payload.
    fn invoke(
        &self,
        kind: &str,
        msg: &str,
        extra: Vec<String>,
        cancel_codes: &[i32],
    ) -> Result<Response> {
        let args = build_dialog_args(
            &self.title,
            &self.backtitle,
            kind,
            msg,
            self.height,
            self.width,
            &extra,
        );

        if self.debug {
            tracing::debug!("{} {}", self.program, shell_words::join(&args));
        }

        let child = Command::new(&self.program)
            .args(&args)
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;
        let output = child.wait_with_output()?;

        // A signal-killed child has no exit code; -1 is in no cancel set,
        // so it flows back to the caller like any other failure code.
        let code = output.status.code().unwrap_or(-1);
        tracing::debug!("dialog exited with code {}", code);

        if cancel_codes.contains(&code) {
            match self.cancel_policy {
                CancelPolicy::ExitProcess => {
                    tracing::info!("User cancelled operation.");
                    std::process::exit(code);
                }
                CancelPolicy::Propagate => return Err(Error::Cancelled(code)),
            }
        }

        Ok(Response {
            code,
            payload: output.stderr,
        })
    }
}

/// Build the argument list passed to the dialog program, after the program
/// name. Extracted for testability.
fn build_dialog_args(
    title: &str,
    backtitle: &str,
    kind: &str,
    msg: &str,
    height: u16,
    width: u16,
    extra: &[String],
) -> Vec<String> {
    let mut args = vec![
        "--title".to_string(),
        title.to_string(),
        "--backtitle".to_string(),
        backtitle.to_string(),
        format!("--{}", kind),
        msg.to_string(),
        height.to_string(),
        width.to_string(),
    ];

    // List kinds rely on positional key/description tokens, so empty
    // descriptions must survive. Only an extra list with no content at all
    // (e.g. an unset inputbox default) is dropped.
    if extra.iter().any(|token| !token.is_empty()) {
        args.extend(extra.iter().cloned());
    }

    args
}

/// Menu extra tokens: the menu-height (the item count, no heuristic) then
/// each entry's key and description in order.
fn build_menu_extra(items: &[ListItem], prefix: &str) -> Vec<String> {
    let mut extra = vec![items.len().to_string()];
    for item in items {
        let (key, description) = item.as_menu_pair(prefix);
        extra.push(key);
        extra.push(description);
    }
    extra
}

/// Radiolist/checklist extra tokens: the computed list height then each
/// entry's key, description, and ON/OFF state in order.
fn build_list_extra(
    list_height: i32,
    items: &[ListItem],
    prefix: &str,
    defaults: Option<&[bool]>,
) -> Vec<String> {
    let fallbacks = resolve_flags(items, defaults);
    let mut extra = vec![list_height.to_string()];
    for (item, fallback) in items.iter().zip(fallbacks) {
        let (key, description, selected) = item.as_list_triple(prefix, fallback);
        extra.push(key);
        extra.push(description);
        extra.push(if selected { "ON" } else { "OFF" }.to_string());
    }
    extra
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(labels: &[&str]) -> Vec<ListItem> {
        labels.iter().map(|l| ListItem::from(*l)).collect()
    }

    #[test]
    fn test_build_dialog_args_shape() {
        let args = build_dialog_args(
            "Title",
            "Back",
            "inputbox",
            "Name?",
            20,
            60,
            &["guest".to_string()],
        );
        assert_eq!(
            args,
            vec![
                "--title", "Title", "--backtitle", "Back", "--inputbox", "Name?", "20", "60",
                "guest"
            ]
        );
    }

    #[test]
    fn test_build_dialog_args_drops_all_empty_extra() {
        let args = build_dialog_args("", "", "inputbox", "Name?", 10, 50, &[String::new()]);
        assert_eq!(
            args,
            vec!["--title", "", "--backtitle", "", "--inputbox", "Name?", "10", "50"]
        );
    }

    #[test]
    fn test_build_dialog_args_keeps_positional_empties() {
        // Bare-label menus carry empty description columns; those must not
        // be filtered out or every following token would shift.
        let extra: Vec<String> = ["2", "a", "", "b", ""].iter().map(|s| s.to_string()).collect();
        let args = build_dialog_args("", "", "menu", "Pick", 10, 50, &extra);
        assert_eq!(&args[8..], &extra[..]);
    }

    #[test]
    fn test_menu_extra_bare_labels() {
        let extra = build_menu_extra(&items(&["a", "b"]), " - ");
        assert_eq!(extra, vec!["2", "a", "", "b", ""]);
    }

    #[test]
    fn test_menu_extra_keyed_entries_get_prefix() {
        let entries: Vec<ListItem> = vec![("k1", "first").into(), ("k2", "second").into()];
        let extra = build_menu_extra(&entries, " - ");
        assert_eq!(extra, vec!["2", "k1", " - first", "k2", " - second"]);
    }

    #[test]
    fn test_list_extra_defaults_resolution() {
        let entries = items(&["x", "y"]);

        let on_off = build_list_extra(2, &entries, "", Some(&[true, false]));
        assert_eq!(on_off, vec!["2", "x", "", "ON", "y", "", "OFF"]);

        let all_off = build_list_extra(2, &entries, "", None);
        assert_eq!(all_off, vec!["2", "x", "", "OFF", "y", "", "OFF"]);

        // Length mismatch falls back to all OFF as well.
        let mismatched = build_list_extra(2, &entries, "", Some(&[true]));
        assert_eq!(mismatched, vec!["2", "x", "", "OFF", "y", "", "OFF"]);
    }

    #[test]
    fn test_list_extra_explicit_flags_bypass_defaults() {
        let entries: Vec<ListItem> = vec![("k1", "d1", true).into(), ("k2", "d2", false).into()];
        let extra = build_list_extra(2, &entries, "", Some(&[false, true]));
        assert_eq!(extra, vec!["2", "k1", "d1", "ON", "k2", "d2", "OFF"]);
    }

    #[test]
    fn test_list_height_without_message() {
        let wt = Whiptail::new().size(10, 50);
        // 10 rows minus 7 of chrome leaves 3 for the list.
        assert_eq!(wt.list_height("", 2), 2);
        assert_eq!(wt.list_height("", 3), 3);
        assert_eq!(wt.list_height("", 8), 3);
    }

    #[test]
    fn test_list_height_with_message() {
        let wt = Whiptail::new().size(20, 50);
        // 120 chars wrap to 3 rows at width 50.
        let msg = "x".repeat(120);
        assert_eq!(wt.list_height(&msg, 4), 4);
        assert_eq!(wt.list_height(&msg, 15), 10);
    }

    #[test]
    fn test_list_height_negative_passes_through() {
        // A dialog shorter than its own chrome yields a negative height.
        // Deliberately not clamped: whiptail's fallback sizing governs, and
        // this test pins that any future clamp is a visible change.
        let wt = Whiptail::new().size(5, 50);
        assert_eq!(wt.list_height("", 3), -2);
    }

    #[test]
    fn test_session_defaults() {
        let wt = Whiptail::new();
        assert_eq!(wt.height, 10);
        assert_eq!(wt.width, 50);
        assert_eq!(wt.program, "whiptail");
        assert_eq!(wt.cancel_policy, CancelPolicy::ExitProcess);
        assert!(!wt.debug);
    }

    #[test]
    fn test_checklist_payload_splits_quoted_selections() {
        let selected = shell_words::split("\"k1\" \"k2\"").unwrap();
        assert_eq!(selected, vec!["k1", "k2"]);
    }
}
