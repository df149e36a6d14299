//! @ai:module:intent Split source files into comment blocks and the handlers they document
//! @ai:module:layer application
//! @ai:module:public_api parse_file, parse_source, ParsedSource, CommentBlock, CommentLine, HandlerLocation
//! @ai:module:depends_on language, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::language::{detect_language, CommentStyle, Language};
use regex::Regex;
use std::path::Path;

/// @ai:intent A run of consecutive comment lines
#[derive(Debug, Clone)]
pub struct CommentBlock {
    pub lines: Vec<CommentLine>,
    pub start_line: usize,
    pub end_line: usize,
}

/// @ai:intent One comment line with its markers removed
#[derive(Debug, Clone)]
pub struct CommentLine {
    pub line_number: usize,
    pub content: String,
}

/// @ai:intent A function definition and the comment block documenting it
#[derive(Debug, Clone)]
pub struct HandlerLocation {
    pub name: String,
    pub line: usize,
    pub comment_block: Option<usize>,
}

/// @ai:intent Comment blocks and handler locations of one source file
#[derive(Debug)]
pub struct ParsedSource {
    pub language: Language,
    pub comment_blocks: Vec<CommentBlock>,
    pub handlers: Vec<HandlerLocation>,
}

impl ParsedSource {
    /// @ai:intent Comment block documenting a handler, if any
    pub fn block_for(&self, handler: &HandlerLocation) -> Option<&CommentBlock> {
        self.comment_blocks.get(handler.comment_block?)
    }
}

/// @ai:intent Read and split a source file
/// @ai:pre path has a supported extension
/// @ai:effects fs:read
pub fn parse_file(path: &Path) -> Result<ParsedSource> {
    let language = detect_language(path)
        .ok_or_else(|| Error::UnsupportedFileType(path.display().to_string()))?;

    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(parse_source(&content, language))
}

/// @ai:intent Split source text into comment blocks and handler locations
/// @ai:effects pure
pub fn parse_source(content: &str, language: Language) -> ParsedSource {
    let comment_blocks = extract_comment_blocks(content, &language.comment_style());
    let handlers = extract_handlers(content, language, &comment_blocks);

    ParsedSource {
        language,
        comment_blocks,
        handlers,
    }
}

fn extract_comment_blocks(content: &str, style: &CommentStyle) -> Vec<CommentBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<CommentBlock> = None;
    let mut in_block_comment = false;

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let trimmed = line.trim();

        if let Some(comment) = extract_comment(trimmed, style, &mut in_block_comment) {
            let comment_line = CommentLine {
                line_number,
                content: comment,
            };

            match &mut current {
                Some(block) => {
                    block.lines.push(comment_line);
                    block.end_line = line_number;
                }
                None => {
                    current = Some(CommentBlock {
                        lines: vec![comment_line],
                        start_line: line_number,
                        end_line: line_number,
                    });
                }
            }
        } else if !trimmed.is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}

/// @ai:intent Comment text of a trimmed line, tracking multi-line block comments
/// @ai:effects pure
fn extract_comment(line: &str, style: &CommentStyle, in_block: &mut bool) -> Option<String> {
    if *in_block {
        if let Some(end) = style.block_end {
            if let Some(pos) = line.find(end) {
                *in_block = false;
                return Some(strip_block_prefix(&line[..pos], style));
            }
        }
        return Some(strip_block_prefix(line, style));
    }

    if let Some(prefix) = style.line_prefixes.iter().find(|p| line.starts_with(**p)) {
        return Some(line[prefix.len()..].trim().to_string());
    }

    let (start, end) = (style.block_start?, style.block_end?);
    let rest = line.strip_prefix(start)?;
    match rest.find(end) {
        Some(pos) => Some(strip_block_prefix(&rest[..pos], style)),
        None => {
            *in_block = true;
            Some(strip_block_prefix(rest, style))
        }
    }
}

fn strip_block_prefix(text: &str, style: &CommentStyle) -> String {
    let text = text.trim();
    match style.block_line_prefix {
        Some(prefix) => text.trim_start_matches(prefix).trim().to_string(),
        None => text.to_string(),
    }
}

fn extract_handlers(
    content: &str,
    language: Language,
    comment_blocks: &[CommentBlock],
) -> Vec<HandlerLocation> {
    let re = Regex::new(language.function_pattern()).expect("Invalid regex pattern");
    let lines: Vec<&str> = content.lines().collect();
    let mut handlers = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_number = idx + 1;

        if let Some(captures) = re.captures(line) {
            let name = captures
                .iter()
                .skip(1)
                .flatten()
                .next()
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            handlers.push(HandlerLocation {
                name,
                line: line_number,
                comment_block: find_preceding_block(line_number, comment_blocks, &lines, language),
            });
        }
    }

    handlers
}

/// @ai:intent Index of the block documenting the function on `line`
/// @ai:pre `lines` holds the whole source, `line` is 1-based
/// @ai:post only attribute lines and at most one blank line separate the block from `line`
/// @ai:effects pure
fn find_preceding_block(
    line: usize,
    blocks: &[CommentBlock],
    lines: &[&str],
    language: Language,
) -> Option<usize> {
    let idx = blocks.iter().rposition(|block| block.end_line < line)?;

    let mut blank_lines = 0;
    for between in &lines[blocks[idx].end_line..line - 1] {
        let trimmed = between.trim();
        if trimmed.is_empty() {
            blank_lines += 1;
            if blank_lines > 1 {
                return None;
            }
        } else if !language.is_attribute_line(trimmed) {
            // Code in between: the block belongs to something earlier.
            return None;
        }
    }

    Some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GO_HANDLER: &str = r#"package api

// GetUser godoc
// @Summary Get a user
// @Router /users/{id} [get]
func (h *Handler) GetUser(c *gin.Context) {
	// not documentation
	id := c.Param("id")
}

func helper() {}
"#;

    #[test]
    fn test_go_blocks_and_handlers() {
        let parsed = parse_source(GO_HANDLER, Language::Go);

        assert_eq!(parsed.handlers.len(), 2);
        let handler = &parsed.handlers[0];
        assert_eq!(handler.name, "GetUser");
        assert_eq!(handler.line, 6);

        let block = parsed.block_for(handler).unwrap();
        assert_eq!(block.start_line, 3);
        assert_eq!(block.end_line, 5);
        assert_eq!(block.lines[1].content, "@Summary Get a user");

        assert!(parsed.block_for(&parsed.handlers[1]).is_none());
    }

    #[test]
    fn test_rust_doc_comment_prefix() {
        let mut in_block = false;
        let style = Language::Rust.comment_style();
        assert_eq!(
            extract_comment("/// @Summary Test", &style, &mut in_block),
            Some("@Summary Test".to_string())
        );
    }

    #[test]
    fn test_jsdoc_block_comment() {
        let source = r#"/**
 * @Summary List pets
 * @Router /pets [get]
 */
export async function listPets(req, res) {}
"#;
        let parsed = parse_source(source, Language::TypeScript);
        let handler = &parsed.handlers[0];
        assert_eq!(handler.name, "listPets");

        let block = parsed.block_for(handler).unwrap();
        let contents: Vec<_> = block.lines.iter().map(|l| l.content.as_str()).collect();
        assert_eq!(contents, vec!["", "@Summary List pets", "@Router /pets [get]", ""]);
    }

    #[test]
    fn test_block_not_shared_with_next_function() {
        let parsed = parse_source(
            "// @Router /a [get]\nfunc A() {}\nfunc B() {}\n",
            Language::Go,
        );
        assert_eq!(parsed.handlers[0].comment_block, Some(0));
        assert_eq!(parsed.handlers[1].comment_block, None);
    }

    #[test]
    fn test_blank_line_gap() {
        let one = parse_source("// @Router /a [get]\n\nfunc A() {}\n", Language::Go);
        assert_eq!(one.handlers[0].comment_block, Some(0));

        let two = parse_source("// @Router /a [get]\n\n\nfunc A() {}\n", Language::Go);
        assert_eq!(two.handlers[0].comment_block, None);
    }

    #[test]
    fn test_rust_attributes_between_doc_and_fn() {
        let source = r#"/// @Summary Get a user
/// @Router /users/{id} [get]
#[get("/users/{id}")]
#[tracing::instrument(skip(state))]
#[allow(clippy::unused_async)]
pub async fn get_user(state: State) -> Json<User> {
    todo!()
}
"#;
        let parsed = parse_source(source, Language::Rust);
        let handler = &parsed.handlers[0];
        assert_eq!(handler.name, "get_user");
        assert_eq!(parsed.block_for(handler).unwrap().end_line, 2);
    }

    #[test]
    fn test_java_stacked_annotations() {
        let source = r#"public class UserController {
    /**
     * @Summary List users
     * @Router /users [get]
     */
    @GetMapping("/users")
    @ResponseBody
    public List<User> listUsers() {
        return users;
    }
}
"#;
        let parsed = parse_source(source, Language::Java);
        let handler = parsed
            .handlers
            .iter()
            .find(|h| h.name == "listUsers")
            .unwrap();
        let block = parsed.block_for(handler).unwrap();
        assert_eq!(block.lines[1].content, "@Summary List users");
    }

    #[test]
    fn test_code_line_starting_with_star_is_not_comment() {
        let source = "func f() {\n\t*ptr = 5\n}\n";
        let parsed = parse_source(source, Language::Go);
        assert!(parsed.comment_blocks.is_empty());
    }

    #[test]
    fn test_unsupported_file() {
        let err = parse_file(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }
}
