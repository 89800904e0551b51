// SPDX-License-Identifier: AGPL-3.0-or-later

//! Well-known binary codec for the geometry model.
//!
//! An encoding starts with a one byte order marker (0 big endian, 1 little
//! endian) followed by the u32 geometry type code and the payload, both in
//! the marked byte order. Members of multi geometries are complete tagged
//! encodings and may use a different byte order than their container.

use thiserror::Error;

use crate::geometry::{
    Contour, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

const TYPE_POINT: u32 = 1;
const TYPE_LINE_STRING: u32 = 2;
const TYPE_POLYGON: u32 = 3;
const TYPE_MULTI_POINT: u32 = 4;
const TYPE_MULTI_LINE_STRING: u32 = 5;
const TYPE_MULTI_POLYGON: u32 = 6;

/// Byte order of an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Big endian, marker byte 0.
    Xdr,
    /// Little endian, marker byte 1.
    Ndr,
}

impl ByteOrder {
    fn marker(self) -> u8 {
        match self {
            ByteOrder::Xdr => 0,
            ByteOrder::Ndr => 1,
        }
    }
}

/// Reasons a byte sequence fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WkbError {
    /// The input ended before the encoding was complete.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// The byte order marker is neither 0 nor 1.
    #[error("unknown byte order marker: {0}")]
    UnknownByteOrder(u8),
    /// The geometry type code is not one of the six known codes.
    #[error("unknown geometry type code: {0}")]
    UnknownGeometryType(u32),
    /// A member of a multi geometry carries the wrong type code.
    #[error("unexpected member geometry type: expected {expected}, got {got}")]
    UnexpectedMember {
        /// The type code the container requires.
        expected: u32,
        /// The type code found in the member header.
        got: u32,
    },
}

/// Encode a geometry in the given byte order.
///
/// Every model value is encodable, so this cannot fail. Rings are written
/// verbatim; repeating the closing point is the caller's concern.
pub fn encode(geometry: &Geometry, order: ByteOrder) -> Vec<u8> {
    let mut out = Vec::new();
    write_geometry(&mut out, geometry, order);
    out
}

/// Decode one geometry from the front of `bytes`.
///
/// Trailing bytes after a complete encoding are ignored.
pub fn decode(bytes: &[u8]) -> Result<Geometry, WkbError> {
    let mut reader = Reader::new(bytes);
    read_geometry(&mut reader)
}

fn write_geometry(out: &mut Vec<u8>, geometry: &Geometry, order: ByteOrder) {
    match geometry {
        Geometry::Point(point) => {
            write_header(out, TYPE_POINT, order);
            write_point(out, *point, order);
        }
        Geometry::LineString(line_string) => {
            write_header(out, TYPE_LINE_STRING, order);
            write_points(out, &line_string.points, order);
        }
        Geometry::Polygon(polygon) => {
            write_header(out, TYPE_POLYGON, order);
            write_polygon(out, polygon, order);
        }
        Geometry::MultiPoint(multi_point) => {
            write_header(out, TYPE_MULTI_POINT, order);
            write_u32(out, multi_point.points.len() as u32, order);
            for point in &multi_point.points {
                write_header(out, TYPE_POINT, order);
                write_point(out, *point, order);
            }
        }
        Geometry::MultiLineString(multi_line_string) => {
            write_header(out, TYPE_MULTI_LINE_STRING, order);
            write_u32(out, multi_line_string.line_strings.len() as u32, order);
            for line_string in &multi_line_string.line_strings {
                write_header(out, TYPE_LINE_STRING, order);
                write_points(out, &line_string.points, order);
            }
        }
        Geometry::MultiPolygon(multi_polygon) => {
            write_header(out, TYPE_MULTI_POLYGON, order);
            write_u32(out, multi_polygon.polygons.len() as u32, order);
            for polygon in &multi_polygon.polygons {
                write_header(out, TYPE_POLYGON, order);
                write_polygon(out, polygon, order);
            }
        }
    }
}

fn write_header(out: &mut Vec<u8>, type_code: u32, order: ByteOrder) {
    out.push(order.marker());
    write_u32(out, type_code, order);
}

fn write_u32(out: &mut Vec<u8>, value: u32, order: ByteOrder) {
    match order {
        ByteOrder::Xdr => out.extend_from_slice(&value.to_be_bytes()),
        ByteOrder::Ndr => out.extend_from_slice(&value.to_le_bytes()),
    }
}

fn write_f64(out: &mut Vec<u8>, value: f64, order: ByteOrder) {
    match order {
        ByteOrder::Xdr => out.extend_from_slice(&value.to_be_bytes()),
        ByteOrder::Ndr => out.extend_from_slice(&value.to_le_bytes()),
    }
}

fn write_point(out: &mut Vec<u8>, point: Point, order: ByteOrder) {
    write_f64(out, point.x, order);
    write_f64(out, point.y, order);
}

fn write_points(out: &mut Vec<u8>, points: &[Point], order: ByteOrder) {
    write_u32(out, points.len() as u32, order);
    for point in points {
        write_point(out, *point, order);
    }
}

fn write_polygon(out: &mut Vec<u8>, polygon: &Polygon, order: ByteOrder) {
    write_u32(out, polygon.rings.len() as u32, order);
    for ring in &polygon.rings {
        write_points(out, &ring.points, order);
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WkbError> {
        let end = self.pos.checked_add(n).ok_or(WkbError::UnexpectedEnd)?;
        if end > self.bytes.len() {
            return Err(WkbError::UnexpectedEnd);
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, WkbError> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self, order: ByteOrder) -> Result<u32, WkbError> {
        let bytes = self.take(4)?;
        let array = [bytes[0], bytes[1], bytes[2], bytes[3]];
        Ok(match order {
            ByteOrder::Xdr => u32::from_be_bytes(array),
            ByteOrder::Ndr => u32::from_le_bytes(array),
        })
    }

    fn read_f64(&mut self, order: ByteOrder) -> Result<f64, WkbError> {
        let bytes = self.take(8)?;
        let array = [
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ];
        Ok(match order {
            ByteOrder::Xdr => f64::from_be_bytes(array),
            ByteOrder::Ndr => f64::from_le_bytes(array),
        })
    }
}

fn read_header(reader: &mut Reader) -> Result<(ByteOrder, u32), WkbError> {
    let order = match reader.read_u8()? {
        0 => ByteOrder::Xdr,
        1 => ByteOrder::Ndr,
        marker => return Err(WkbError::UnknownByteOrder(marker)),
    };
    let type_code = reader.read_u32(order)?;
    Ok((order, type_code))
}

fn read_member_header(reader: &mut Reader, expected: u32) -> Result<ByteOrder, WkbError> {
    let (order, type_code) = read_header(reader)?;
    if type_code != expected {
        return Err(WkbError::UnexpectedMember {
            expected,
            got: type_code,
        });
    }
    Ok(order)
}

fn read_geometry(reader: &mut Reader) -> Result<Geometry, WkbError> {
    let (order, type_code) = read_header(reader)?;
    match type_code {
        TYPE_POINT => Ok(Geometry::Point(read_point(reader, order)?)),
        TYPE_LINE_STRING => Ok(Geometry::LineString(LineString::new(read_points(
            reader, order,
        )?))),
        TYPE_POLYGON => Ok(Geometry::Polygon(read_polygon(reader, order)?)),
        TYPE_MULTI_POINT => {
            let count = reader.read_u32(order)?;
            let mut points = Vec::new();
            for _ in 0..count {
                let member_order = read_member_header(reader, TYPE_POINT)?;
                points.push(read_point(reader, member_order)?);
            }
            Ok(Geometry::MultiPoint(MultiPoint::new(points)))
        }
        TYPE_MULTI_LINE_STRING => {
            let count = reader.read_u32(order)?;
            let mut line_strings = Vec::new();
            for _ in 0..count {
                let member_order = read_member_header(reader, TYPE_LINE_STRING)?;
                line_strings.push(LineString::new(read_points(reader, member_order)?));
            }
            Ok(Geometry::MultiLineString(MultiLineString::new(
                line_strings,
            )))
        }
        TYPE_MULTI_POLYGON => {
            let count = reader.read_u32(order)?;
            let mut polygons = Vec::new();
            for _ in 0..count {
                let member_order = read_member_header(reader, TYPE_POLYGON)?;
                polygons.push(read_polygon(reader, member_order)?);
            }
            Ok(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        code => Err(WkbError::UnknownGeometryType(code)),
    }
}

fn read_point(reader: &mut Reader, order: ByteOrder) -> Result<Point, WkbError> {
    let x = reader.read_f64(order)?;
    let y = reader.read_f64(order)?;
    Ok(Point::new(x, y))
}

fn read_points(reader: &mut Reader, order: ByteOrder) -> Result<Vec<Point>, WkbError> {
    let count = reader.read_u32(order)?;
    let mut points = Vec::new();
    for _ in 0..count {
        points.push(read_point(reader, order)?);
    }
    Ok(points)
}

fn read_polygon(reader: &mut Reader, order: ByteOrder) -> Result<Polygon, WkbError> {
    let ring_count = reader.read_u32(order)?;
    let mut rings = Vec::new();
    for _ in 0..ring_count {
        rings.push(Contour::new(read_points(reader, order)?));
    }
    Ok(Polygon::new(rings))
}
