use log::debug;
use std::iter::Peekable;
use std::vec::IntoIter;

use super::ast::{ParseError, ParsedCommand, RedirectOp};

const BACKGROUND: &str = "&";

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '\x07'
}

pub struct Parser<'a> {
    tokens: Peekable<IntoIter<&'a str>>,
    foreground_only: bool,
}

impl<'a> Parser<'a> {
    /// `foreground_only` 为真时，行尾的 `&` 被吞掉但不生效
    pub fn new(input: &'a str, foreground_only: bool) -> Self {
        let tokens: Vec<&'a str> = input
            .split(is_delimiter)
            .filter(|token| !token.is_empty())
            .collect();
        Parser {
            tokens: tokens.into_iter().peekable(),
            foreground_only,
        }
    }

    pub fn parse_command(&mut self) -> Result<ParsedCommand, ParseError> {
        let mut command = ParsedCommand::default();

        // 注释行直接返回空命令
        if let Some(first) = self.tokens.peek() {
            if first.starts_with('#') {
                return Ok(command);
            }
        }

        while let Some(token) = self.tokens.next() {
            if let Some(op) = RedirectOp::from_token(token) {
                let path = self.tokens.next().ok_or(ParseError::MissingPath(op))?;
                command.redirect(op, path.to_string());
                continue;
            }

            if token == BACKGROUND {
                let is_last = self.tokens.peek().is_none();
                command.background = is_last && !self.foreground_only;
                if !is_last {
                    let dropped: Vec<&str> = self.tokens.by_ref().collect();
                    debug!("'&' 不在行尾, 忽略后续参数: {:?}", dropped);
                } else if self.foreground_only {
                    debug!("前台模式下忽略 '&'");
                }
                break;
            }

            command.arguments.push(token.to_string());
        }

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<ParsedCommand, ParseError> {
        Parser::new(line, false).parse_command()
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_simple_command() {
        let cmd = parse("ls -l").unwrap();
        assert_eq!(cmd.arguments, vec!["ls", "-l"]);
        assert_eq!(cmd.input, None);
        assert_eq!(cmd.output, None);
        assert!(!cmd.background);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_output_redirection() {
        let cmd = parse("ls -l > out.txt").unwrap();
        assert_eq!(cmd.arguments, vec!["ls", "-l"]);
        assert_eq!(cmd.output.as_deref(), Some("out.txt"));
        assert_eq!(cmd.input, None);
        assert!(!cmd.background);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_both_redirections_and_background() {
        let cmd = parse("sort < in.txt > out.txt &").unwrap();
        assert_eq!(cmd.arguments, vec!["sort"]);
        assert_eq!(cmd.input.as_deref(), Some("in.txt"));
        assert_eq!(cmd.output.as_deref(), Some("out.txt"));
        assert!(cmd.background);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_arguments_after_redirection_are_kept() {
        let cmd = parse("wc < in.txt -l").unwrap();
        assert_eq!(cmd.arguments, vec!["wc", "-l"]);
        assert_eq!(cmd.input.as_deref(), Some("in.txt"));
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_background() {
        let cmd = parse("sleep 5 &").unwrap();
        assert_eq!(cmd.arguments, vec!["sleep", "5"]);
        assert!(cmd.background);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_background_ignored_in_foreground_only_mode() {
        let cmd = Parser::new("sleep 5 &", true).parse_command().unwrap();
        assert_eq!(cmd.arguments, vec!["sleep", "5"]);
        assert!(!cmd.background);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_ampersand_not_last_stops_scanning() {
        let cmd = parse("echo a & b c").unwrap();
        assert_eq!(cmd.arguments, vec!["echo", "a"]);
        assert!(!cmd.background);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_ampersand_inside_word_is_plain_argument() {
        let cmd = parse("echo a&b").unwrap();
        assert_eq!(cmd.arguments, vec!["echo", "a&b"]);
        assert!(!cmd.background);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_blank_and_comment_lines() {
        assert!(parse("").unwrap().is_noop());
        assert!(parse("   \t ").unwrap().arguments.is_empty());
        let comment = parse("# comment > nowhere").unwrap();
        assert!(comment.arguments.is_empty());
        assert!(comment.output.is_none());
        assert!(comment.is_noop());
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_mixed_whitespace() {
        let cmd = parse("  echo\thello \r\n").unwrap();
        assert_eq!(cmd.arguments, vec!["echo", "hello"]);
    }

    #[test]
    fn test_missing_redirection_path() {
        assert_eq!(
            parse("cat <"),
            Err(ParseError::MissingPath(RedirectOp::Input))
        );
        assert_eq!(
            parse("echo hi >"),
            Err(ParseError::MissingPath(RedirectOp::Output))
        );
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_last_redirection_wins() {
        let cmd = parse("echo hi > a.txt > b.txt").unwrap();
        assert_eq!(cmd.output.as_deref(), Some("b.txt"));
    }
}
