//! Writing comment trees back to source text.
//!
//! Text tokens are written in their raw form, so a comment read by
//! [`parse`](crate::parse) serializes to the same bytes. Attribute values are
//! stored decoded and are escaped on the way out.

use std::fmt;

use crate::node::{Attribute, CommentNode, DocComment, TextToken};
use crate::options::NewLineStyle;
use crate::writer::CommentWriter;

/// Write a whole comment, first-line marker included, ending with a line
/// terminator.
pub fn write_comment<W: fmt::Write>(
    writer: &mut CommentWriter<W>,
    comment: &DocComment,
) -> fmt::Result {
    if let Some(exterior) = &comment.exterior {
        writer.write_constant(exterior)?;
    }
    write_nodes(writer, &comment.content)?;
    writer.ensure_terminated_by_newline()
}

pub fn write_nodes<W: fmt::Write>(
    writer: &mut CommentWriter<W>,
    nodes: &[CommentNode],
) -> fmt::Result {
    for node in nodes {
        write_node(writer, node)?;
    }
    Ok(())
}

pub fn write_node<W: fmt::Write>(writer: &mut CommentWriter<W>, node: &CommentNode) -> fmt::Result {
    match node {
        CommentNode::Element(element) => {
            write_start_tag(writer, &element.name, &element.attributes)?;
            write_nodes(writer, &element.children)?;
            write_end_tag(writer, &element.name)
        }
        CommentNode::EmptyElement(element) => {
            writer.write_char('<')?;
            writer.write_constant(&element.name)?;
            write_attributes(writer, &element.attributes)?;
            writer.write_constant("/>")
        }
        CommentNode::Text(text) => {
            for token in &text.tokens {
                write_token(writer, token)?;
            }
            Ok(())
        }
        CommentNode::RawSection(section) => {
            writer.write_constant("<![CDATA[")?;
            writer.write_span(&section.text)?;
            writer.write_constant("]]>")
        }
    }
}

/// `<name attr="v">`
pub fn write_start_tag<W: fmt::Write>(
    writer: &mut CommentWriter<W>,
    name: &str,
    attributes: &[Attribute],
) -> fmt::Result {
    writer.write_char('<')?;
    writer.write_constant(name)?;
    write_attributes(writer, attributes)?;
    writer.write_char('>')
}

/// `</name>`
pub fn write_end_tag<W: fmt::Write>(writer: &mut CommentWriter<W>, name: &str) -> fmt::Result {
    writer.write_constant("</")?;
    writer.write_constant(name)?;
    writer.write_char('>')
}

fn write_token<W: fmt::Write>(writer: &mut CommentWriter<W>, token: &TextToken) -> fmt::Result {
    writer.write_span(&token.text)?;
    if let Some(exterior) = &token.exterior {
        writer.write_constant(exterior)?;
    }
    Ok(())
}

fn write_attributes<W: fmt::Write>(
    writer: &mut CommentWriter<W>,
    attributes: &[Attribute],
) -> fmt::Result {
    for attribute in attributes {
        writer.write_char(' ')?;
        writer.write_constant(&attribute.name)?;
        writer.write_constant("=\"")?;
        let escaped = html_escape::encode_double_quoted_attribute(attribute.value.as_str());
        writer.write_span(&escaped)?;
        writer.write_char('"')?;
    }
    Ok(())
}

/// Serialize a comment to a string with the given line terminator.
pub fn to_text(comment: &DocComment, newline: NewLineStyle) -> String {
    let mut out = String::new();
    let mut writer = CommentWriter::new(&mut out, newline);
    // Writing into a String cannot fail
    write_comment(&mut writer, comment).ok();
    out
}

/// Serialize content without the comment's first-line marker or final
/// terminator.
pub fn nodes_to_text(nodes: &[CommentNode], newline: NewLineStyle) -> String {
    let mut out = String::new();
    let mut writer = CommentWriter::new(&mut out, newline);
    // Writing into a String cannot fail
    write_nodes(&mut writer, nodes).ok();
    out
}

impl fmt::Display for DocComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_comment(&mut CommentWriter::new(f, NewLineStyle::Lf), self)
    }
}

impl fmt::Display for CommentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(&mut CommentWriter::new(f, NewLineStyle::Lf), self)
    }
}
