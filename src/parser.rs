use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::TrackViewError;
use crate::gpx_types::*;

type Result<T> = std::result::Result<T, TrackViewError>;

/// Parse a GPX XML string into GpxData.
///
/// Points whose `lat`/`lon` are missing or not numbers are skipped with a
/// warning; empty track segments are dropped.
pub fn parse_gpx(xml: &str) -> Result<GpxData> {
    let mut reader = Reader::from_str(xml);
    let mut data = GpxData::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"wpt" => {
                    if let Some(pt) = parse_point(PointKind::Waypoint, &e, &mut reader)? {
                        data.waypoints.push(pt);
                    }
                }
                b"rte" => data.routes.push(parse_route(&mut reader)?),
                b"trk" => data.tracks.push(parse_track(&mut reader)?),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"wpt" {
                    if let Some(pt) = parse_empty_point(PointKind::Waypoint, &e) {
                        data.waypoints.push(pt);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TrackViewError::XmlParse(e)),
            _ => {}
        }
    }

    log::debug!(
        "parsed GPX: {} waypoints, {} routes, {} tracks",
        data.waypoints.len(),
        data.routes.len(),
        data.tracks.len()
    );

    Ok(data)
}

/// Parse lat/lon attributes from a point element's start tag.
fn parse_lat_lon(kind: PointKind, e: &BytesStart<'_>) -> Result<(f64, f64)> {
    let element = kind.element_name();
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| TrackViewError::XmlParse(e.into()))?;
        let key = attr.key.local_name();
        let val = std::str::from_utf8(&attr.value).unwrap_or_default();
        let parse = |attribute: &'static str| {
            val.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| TrackViewError::InvalidAttribute {
                    element,
                    attribute,
                    value: val.to_string(),
                })
        };
        match key.as_ref() {
            b"lat" => lat = Some(parse("lat")?),
            b"lon" => lon = Some(parse("lon")?),
            _ => {}
        }
    }

    let lat = lat.ok_or(TrackViewError::MissingAttribute {
        element,
        attribute: "lat",
    })?;
    let lon = lon.ok_or(TrackViewError::MissingAttribute {
        element,
        attribute: "lon",
    })?;

    Ok((lat, lon))
}

/// Handle a self-closing point element (`<trkpt lat=".." lon=".."/>`).
fn parse_empty_point(kind: PointKind, e: &BytesStart<'_>) -> Option<GpxPoint> {
    match parse_lat_lon(kind, e) {
        Ok((lat, lon)) => Some(GpxPoint::new(lat, lon)),
        Err(err) => {
            log::warn!("skipping {}: {err}", kind.label());
            None
        }
    }
}

/// Parse a point element (wpt, rtept, trkpt) and its children.
/// Called after receiving Event::Start for the point element.
fn parse_point<'a>(
    kind: PointKind,
    start: &BytesStart<'a>,
    reader: &mut Reader<&'a [u8]>,
) -> Result<Option<GpxPoint>> {
    let (lat, lon) = match parse_lat_lon(kind, start) {
        Ok(coords) => coords,
        Err(err) => {
            log::warn!("skipping {}: {err}", kind.label());
            reader
                .read_to_end(start.name())
                .map_err(TrackViewError::XmlParse)?;
            return Ok(None);
        }
    };

    let mut point = GpxPoint::new(lat, lon);
    let end_name = start.name().0.to_vec();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"ele" => point.ele = parse_elevation(kind, &read_text_owned(reader, &e)?),
                b"time" => point.time = Some(read_text_owned(reader, &e)?),
                b"name" => point.name = Some(read_text_owned(reader, &e)?),
                b"desc" => point.desc = Some(read_text_owned(reader, &e)?),
                _ => {
                    // extensions, links and the rest of the schema
                    reader
                        .read_to_end(e.name())
                        .map_err(TrackViewError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(TrackViewError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(Some(point))
}

/// Elevation text of a point; blank, unparseable or non-finite values are dropped.
fn parse_elevation(kind: PointKind, text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let ele = text.parse::<f64>().ok().filter(|v| v.is_finite());
    if ele.is_none() {
        log::warn!("dropping elevation {text:?} of {}", kind.label());
    }
    ele
}

/// Parse a <rte> element.
fn parse_route<'a>(reader: &mut Reader<&'a [u8]>) -> Result<GpxRoute> {
    let mut route = GpxRoute::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"name" => route.name = Some(read_text_owned(reader, &e)?),
                b"desc" => route.desc = Some(read_text_owned(reader, &e)?),
                b"rtept" => {
                    if let Some(pt) = parse_point(PointKind::RoutePoint, &e, reader)? {
                        route.points.push(pt);
                    }
                }
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(TrackViewError::XmlParse)?;
                }
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"rtept" {
                    if let Some(pt) = parse_empty_point(PointKind::RoutePoint, &e) {
                        route.points.push(pt);
                    }
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"rte" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(TrackViewError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(route)
}

/// Parse a <trk> element.
fn parse_track<'a>(reader: &mut Reader<&'a [u8]>) -> Result<GpxTrack> {
    let mut track = GpxTrack::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"name" => track.name = Some(read_text_owned(reader, &e)?),
                b"desc" => track.desc = Some(read_text_owned(reader, &e)?),
                b"trkseg" => {
                    let seg = parse_segment(reader)?;
                    if !seg.points.is_empty() {
                        track.segments.push(seg);
                    }
                }
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(TrackViewError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"trk" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(TrackViewError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(track)
}

/// Parse a <trkseg> element.
fn parse_segment<'a>(reader: &mut Reader<&'a [u8]>) -> Result<GpxSegment> {
    let mut segment = GpxSegment::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"trkpt" => {
                    if let Some(pt) = parse_point(PointKind::TrackPoint, &e, reader)? {
                        segment.points.push(pt);
                    }
                }
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(TrackViewError::XmlParse)?;
                }
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"trkpt" {
                    if let Some(pt) = parse_empty_point(PointKind::TrackPoint, &e) {
                        segment.points.push(pt);
                    }
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"trkseg" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(TrackViewError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(segment)
}

/// Read text content of an element as an owned String.
/// Handles regular text, CDATA sections, and entity references (Event::GeneralRef).
fn read_text_owned<'a>(reader: &mut Reader<&'a [u8]>, start: &BytesStart<'_>) -> Result<String> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::CData(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::GeneralRef(e)) => {
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    text.push(ch);
                } else {
                    match std::str::from_utf8(e.as_ref()).unwrap_or_default() {
                        "amp" => text.push('&'),
                        "lt" => text.push('<'),
                        "gt" => text.push('>'),
                        "quot" => text.push('"'),
                        "apos" => text.push('\''),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(TrackViewError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(text)
}
