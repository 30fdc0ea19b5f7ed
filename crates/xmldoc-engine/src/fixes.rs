//! Smaller rewrites built from the same pieces as the pipeline.

use xmldoc_syntax::factory::{
    new_line, para_element, placeholder_element, token_element, value_element,
};
use xmldoc_syntax::query::first_element;
use xmldoc_syntax::{CommentNode, DocComment, FormatOptions, TextToken};

use crate::align::{last_exterior, replace_exterior};
use crate::boundary::trim_boundaries;

const GETS: &str = "Gets ";

/// How a serialized property behaves when it is missing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    NullIfNotIncluded,
    DefaultArrayIfNotIncluded,
}

impl DefaultValue {
    pub fn as_str(self) -> &'static str {
        match self {
            DefaultValue::NullIfNotIncluded => "NullIfNotIncluded",
            DefaultValue::DefaultArrayIfNotIncluded => "DefaultArrayIfNotIncluded",
        }
    }
}

/// Add a `<value>` element derived from the comment's `<summary>`.
///
/// The summary text goes into a placeholder (without a leading "Gets "),
/// followed by a token naming `default_value`. New lines are indented like
/// the last line of the existing comment. `None` when there is no summary.
pub fn document_value_from_summary(
    comment: &DocComment,
    default_value: DefaultValue,
    options: &FormatOptions,
) -> Option<DocComment> {
    let summary = first_element(&comment.content, "summary")?;
    let summary = summary.as_element()?;

    let mut summary_content = summary.children.clone();
    if let Some(first) = summary_content.first_mut()
        && let Some(stripped) = strip_gets(first)
    {
        *first = stripped;
    }

    let mut value = value_element(
        vec![
            para_element(vec![placeholder_element(trim_boundaries(&summary_content))]),
            new_line(options),
            token_element(default_value.as_str()),
        ],
        options,
    );
    let mut leading = new_line(options);

    if let Some(exterior) = last_exterior(&comment.content) {
        leading = replace_exterior(&leading, &exterior);
        value = replace_exterior(&value, &exterior);
    }

    log::debug!("documenting value from summary as {}", default_value.as_str());
    let mut content = comment.content.clone();
    content.push(leading);
    content.push(value);
    Some(comment.with_content(content))
}

/// Drop the first "Gets " of a text node that starts with it, capitalizing
/// what follows in the raw text.
fn strip_gets(node: &CommentNode) -> Option<CommentNode> {
    let text = node.as_text()?;
    let joined: String = text.tokens.iter().map(|t| t.text.as_str()).collect();
    if !joined.trim_start().starts_with(GETS) {
        return None;
    }

    let position = text
        .tokens
        .iter()
        .position(|t| !t.is_new_line() && t.text.trim_start().starts_with(GETS))?;
    let token = &text.tokens[position];

    let raw = match token.text.find(GETS) {
        Some(index) => {
            let rest = &token.text[index + GETS.len()..];
            let mut chars = rest.chars();
            let capitalized: String = match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            };
            format!("{}{}", &token.text[..index], capitalized)
        }
        None => token.text.clone(),
    };
    let value = token.value.replacen(GETS, "", 1);

    let mut tokens = text.tokens.clone();
    tokens[position] = TextToken {
        text: raw,
        value,
        ..token.clone()
    };
    Some(CommentNode::text(tokens))
}

/// Replace the `placeholder` element at `path` with its content.
///
/// `path` holds child indices from the top of `content` down to the
/// placeholder. `None` when the path does not lead to a `placeholder`
/// element, or when the placeholder is still empty.
pub fn finalize_placeholder(content: &[CommentNode], path: &[usize]) -> Option<Vec<CommentNode>> {
    let (&index, rest) = path.split_first()?;
    let node = content.get(index)?;

    let replacement = if rest.is_empty() {
        if !node.is_named("placeholder") {
            return None;
        }
        let element = node.as_element()?;
        if element.children.iter().all(CommentNode::is_blank) {
            return None;
        }
        log::debug!("finalizing placeholder text");
        element.children.clone()
    } else {
        let children = finalize_placeholder(node.children(), rest)?;
        vec![node.with_children(children)]
    };

    let mut out = Vec::with_capacity(content.len() + replacement.len());
    out.extend(content[..index].iter().cloned());
    out.extend(replacement);
    out.extend(content[index + 1..].iter().cloned());
    Some(out)
}
