// src/grid/codec.rs

use crate::error::{PathError, Result};
use crate::grid::{Grid, Terrain};
use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use std::io::{Read, Write};

/// Binary layout of a stored grid (all little-endian):
///
/// ```text
/// offset  field   type / size
/// ------  ------  -----------
///  0-3    magic   b"TGRD"
///  4      fill    u8 terrain code
///  5-8    size    u32
///  9-     cells   size*size u8 terrain codes, row-major
/// ```
pub const MAGIC: &[u8; 4] = b"TGRD";

/// Upper bound on the stored side length, so a corrupt header can't make us
/// allocate gigabytes.
pub const MAX_STORED_SIZE: u32 = 4096;

impl Grid {
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(MAGIC)?;
        writer.write_u8(self.fill().code())?;
        let size = u32::try_from(self.size()).map_err(|_| {
            PathError::InvalidArgument(format!("grid size {} too large to store", self.size()))
        })?;
        writer.write_u32::<LE>(size)?;
        for terrain in self.cells() {
            writer.write_u8(terrain.code())?;
        }
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Grid> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(PathError::Decode(format!("bad magic {:?}", magic)));
        }

        let fill = decode_terrain(reader.read_u8()?)?;
        if !fill.is_fill() {
            return Err(PathError::Decode(format!("{:?} is not a fill terrain", fill)));
        }

        let size = reader.read_u32::<LE>()?;
        if size == 0 || size > MAX_STORED_SIZE {
            return Err(PathError::Decode(format!("unsupported grid size {}", size)));
        }
        let size = size as usize;

        let mut raw = vec![0u8; size * size];
        reader.read_exact(&mut raw)?;
        let cells = raw
            .into_iter()
            .map(decode_terrain)
            .collect::<Result<Vec<_>>>()?;

        Ok(Grid::from_cells(size, fill, cells))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(9 + self.cells().len());
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Grid> {
        let mut cursor = bytes;
        Grid::read_from(&mut cursor)
    }
}

fn decode_terrain(code: u8) -> Result<Terrain> {
    Terrain::from_code(code)
        .ok_or_else(|| PathError::Decode(format!("unknown terrain code {}", code)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_grid() -> Grid {
        let mut grid = Grid::new(3, Terrain::Obstacle).unwrap();
        for row in 0..3 {
            grid.set(row, 0, Terrain::Edge);
            grid.set(row, 2, Terrain::Edge);
        }
        grid.set(1, 1, Terrain::Path);
        grid
    }

    #[test]
    fn test_layout() {
        let bytes = sample_grid().to_bytes().unwrap();
        assert_eq!(&bytes[0..4], b"TGRD");
        assert_eq!(bytes[4], Terrain::Obstacle.code());
        assert_eq!(&bytes[5..9], &3u32.to_le_bytes());
        assert_eq!(bytes.len(), 9 + 9);
        // Second row: Edge, Path, Edge.
        assert_eq!(&bytes[12..15], &[2, 1, 2]);
    }

    #[test]
    fn test_read_back_through_cursor() {
        let grid = sample_grid();
        let mut cursor = Cursor::new(Vec::new());
        grid.write_to(&mut cursor).unwrap();
        cursor.set_position(0);
        let loaded = Grid::read_from(&mut cursor).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_to_bytes_matches_writer() {
        let grid = sample_grid();
        let mut written = Vec::new();
        grid.write_to(&mut written).unwrap();
        let bytes = grid.to_bytes().unwrap();
        assert_eq!(bytes, written);
        assert_eq!(bytes.len(), MAGIC.len() + 1 + 4 + grid.cells().len());
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = sample_grid().to_bytes().unwrap();
        bytes[0] = b'X';
        assert!(matches!(Grid::from_bytes(&bytes), Err(PathError::Decode(_))));
    }

    #[test]
    fn test_rejects_unknown_terrain() {
        let mut bytes = sample_grid().to_bytes().unwrap();
        bytes[10] = 9;
        assert!(matches!(Grid::from_bytes(&bytes), Err(PathError::Decode(_))));
    }

    #[test]
    fn test_rejects_truncated_data() {
        let bytes = sample_grid().to_bytes().unwrap();
        assert!(matches!(
            Grid::from_bytes(&bytes[..bytes.len() - 1]),
            Err(PathError::Io(_))
        ));
    }

    #[test]
    fn test_rejects_zero_size() {
        let mut bytes = sample_grid().to_bytes().unwrap();
        bytes[5..9].copy_from_slice(&0u32.to_le_bytes());
        assert!(matches!(Grid::from_bytes(&bytes), Err(PathError::Decode(_))));
    }
}
