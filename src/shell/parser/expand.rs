use std::borrow::Cow;

pub const PID_MARKER: &str = "$$";

/// Replaces every `$$` in the raw line with the shell's process id.
pub fn expand_pid(line: &str, pid: u32) -> Cow<'_, str> {
    if line.contains(PID_MARKER) {
        Cow::Owned(line.replace(PID_MARKER, &pid.to_string()))
    } else {
        Cow::Borrowed(line)
    }
}
