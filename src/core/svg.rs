//! Title injection for optimized icon SVGs.
//!
//! The icon's root `svg` element must carry a `title` element holding the
//! human-readable title. A `title` that is a direct child of the root is
//! retitled in place; otherwise one is inserted as the first child.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};

fn not_svg(problem: impl Into<String>) -> Error {
    Error::validation_invalid_argument("file", problem, None)
}

fn title_events(start: BytesStart<'static>, title: &str) -> [Event<'static>; 3] {
    [
        Event::Start(start),
        Event::Text(BytesText::from_escaped(partial_escape(title).into_owned())),
        Event::End(BytesEnd::new("title")),
    ]
}

fn read_events(svg: &str) -> Result<Vec<Event<'static>>> {
    let mut reader = Reader::from_str(svg);
    reader.config_mut().trim_text(false);

    let mut events = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => events.push(event.into_owned()),
            Err(e) => return Err(not_svg(format!("file is not well-formed XML: {}", e))),
        }
    }
    Ok(events)
}

/// Set the title of an SVG document.
pub fn inject_title(svg: &str, title: &str) -> Result<String> {
    let mut events = read_events(svg)?;

    let root = events
        .iter()
        .position(|event| match event {
            Event::Start(e) | Event::Empty(e) => e.name().as_ref() == b"svg",
            _ => false,
        })
        .ok_or_else(|| not_svg("file does not contain an <svg> element"))?;

    if let Event::Empty(e) = &events[root] {
        let open = Event::Start(e.clone());
        let mut replacement = vec![open];
        replacement.extend(title_events(BytesStart::new("title"), title));
        replacement.push(Event::End(BytesEnd::new("svg")));
        events.splice(root..=root, replacement);
        return write_events(events);
    }

    // Only direct children of the root are considered.
    let mut depth = 0usize;
    let mut existing = None;
    for (i, event) in events.iter().enumerate().skip(root + 1) {
        match event {
            Event::Start(e) if depth == 0 && e.name().as_ref() == b"title" => {
                existing = Some((i, false));
                break;
            }
            Event::Empty(e) if depth == 0 && e.name().as_ref() == b"title" => {
                existing = Some((i, true));
                break;
            }
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            _ => {}
        }
    }

    match existing {
        Some((start, empty)) => {
            let open = match &events[start] {
                Event::Start(e) | Event::Empty(e) => e.clone(),
                _ => BytesStart::new("title"),
            };
            let end = if empty {
                start
            } else {
                matching_end(&events, start)
                    .ok_or_else(|| not_svg("unterminated <title> element"))?
            };
            events.splice(start..=end, title_events(open, title));
        }
        None => {
            let at = root + 1;
            events.splice(at..at, title_events(BytesStart::new("title"), title));
        }
    }

    write_events(events)
}

fn matching_end(events: &[Event<'static>], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, event) in events.iter().enumerate().skip(start + 1) {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Some(i),
            Event::End(_) => depth -= 1,
            _ => {}
        }
    }
    None
}

fn write_events(events: Vec<Event<'static>>) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    for event in events {
        writer
            .write_event(event)
            .map_err(|e| Error::internal_io(e.to_string(), Some("write svg".to_string())))?;
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::internal_io(e.to_string(), Some("write svg".to_string())))
}
