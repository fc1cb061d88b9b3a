//! Page contents to PDF content stream operators.

use super::page::{PageContents, Stroke, TextRun};
use crate::colour::Colour;
use std::io::Write;

#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(contents: &[PageContents]) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::new();

    for item in contents {
        write!(content, "q\n")?;
        match item {
            PageContents::Text(run) => render_text(&mut content, run)?,
            PageContents::Line { from, to, stroke } => {
                write_stroke(&mut content, stroke)?;
                write!(content, "{} {} m\n", from.0, from.1)?;
                write!(content, "{} {} l\nS\n", to.0, to.1)?;
            }
            PageContents::Rect { rect, fill, stroke } => {
                if let Some(stroke) = stroke {
                    write_stroke(&mut content, stroke)?;
                }
                if let Some(fill) = fill {
                    write_colour(&mut content, *fill, "rg")?;
                }
                write!(
                    content,
                    "{} {} {} {} re\n",
                    rect.x1,
                    rect.y1,
                    rect.x2 - rect.x1,
                    rect.y2 - rect.y1
                )?;
                let op = match (fill.is_some(), stroke.is_some()) {
                    (true, true) => "B",
                    (true, false) => "f",
                    (false, true) => "S",
                    (false, false) => "n",
                };
                write!(content, "{op}\n")?;
            }
            PageContents::Image { image, position } => {
                write!(
                    content,
                    "{} 0 0 {} {} {} cm\n",
                    position.x2 - position.x1,
                    position.y2 - position.y1,
                    position.x1,
                    position.y1
                )?;
                write!(content, "/I{} Do\n", image.index())?;
            }
        }
        write!(content, "Q\n")?;
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text(content: &mut Vec<u8>, run: &TextRun) -> Result<(), std::io::Error> {
    write_colour(content, run.colour, "rg")?;
    write!(content, "BT\n")?;
    write!(content, "/F{} {} Tf\n", run.font.index(), run.em)?;
    write!(content, "{} Tz\n", run.scale)?;
    write!(content, "{} {} Td\n", run.x, run.y)?;
    write!(content, "<")?;
    for gid in &run.glyphs {
        write!(content, "{gid:04x}")?;
    }
    write!(content, "> Tj\n")?;
    write!(content, "ET\n")?;

    if let Some((offset, thickness)) = run.underline {
        write!(
            content,
            "{} {} {} {} re\nf\n",
            run.x,
            run.y + offset - thickness * 0.5,
            run.width,
            thickness
        )?;
    }
    Ok(())
}

fn write_stroke(content: &mut Vec<u8>, stroke: &Stroke) -> Result<(), std::io::Error> {
    write_colour(content, stroke.colour, "RG")?;
    writeln!(content, "{} w", stroke.width)
}

fn write_colour(content: &mut Vec<u8>, colour: Colour, op: &str) -> Result<(), std::io::Error> {
    let (r, g, b) = colour.components();
    writeln!(content, "{r} {g} {b} {op}")
}
