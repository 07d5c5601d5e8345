//! A compact, hashable representation of a [`Shape`].
//!
//! A packed shape stores its three dimensions as bytes, followed by the
//! occupancy of every cell in scan order, eight cells per byte, least
//! significant bit first.
//!
//! This is the same record layout `.pcube` files use for each polycube, so
//! the bytes written by [`PackedShape::pack`] can be appended to such a file
//! body as is, and records read from one can be passed to
//! [`PackedShape::unpack`].

use std::io::{Read, Write};

use crate::{error::ShapeError, Shape};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackedShape {
    dim_1: u8,
    dim_2: u8,
    dim_3: u8,
    data: Vec<u8>,
}

fn byte_len(dim_1: u8, dim_2: u8, dim_3: u8) -> usize {
    ((dim_1 as usize) * (dim_2 as usize) * (dim_3 as usize) + 7) / 8
}

impl PackedShape {
    pub fn new(dim_1: u8, dim_2: u8, dim_3: u8, data: &[u8]) -> Option<Self> {
        if data.len() != byte_len(dim_1, dim_2, dim_3) {
            return None;
        }

        Some(Self {
            dim_1,
            dim_2,
            dim_3,
            data: data.to_vec(),
        })
    }

    pub fn dims(&self) -> (u8, u8, u8) {
        (self.dim_1, self.dim_2, self.dim_3)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one `[dim_1, dim_2, dim_3, data...]` record.
    pub fn unpack(mut from: impl Read) -> std::io::Result<Self> {
        let mut dims = [0u8; 3];
        from.read_exact(&mut dims)?;

        let [dim_1, dim_2, dim_3] = dims;
        let mut data = vec![0u8; byte_len(dim_1, dim_2, dim_3)];
        from.read_exact(&mut data)?;

        Ok(Self {
            dim_1,
            dim_2,
            dim_3,
            data,
        })
    }

    /// Write this shape as one `[dim_1, dim_2, dim_3, data...]` record.
    pub fn pack(&self, mut to: impl Write) -> std::io::Result<()> {
        let header = [self.dim_1, self.dim_2, self.dim_3];
        to.write_all(&header)?;
        to.write_all(&self.data)
    }
}

impl TryFrom<&'_ Shape> for PackedShape {
    type Error = ShapeError;

    fn try_from(value: &'_ Shape) -> Result<Self, Self::Error> {
        let dims = value.dims();
        let too_large = || ShapeError::TooLarge { dims };

        let dim_1 = u8::try_from(dims.0).map_err(|_| too_large())?;
        let dim_2 = u8::try_from(dims.1).map_err(|_| too_large())?;
        let dim_3 = u8::try_from(dims.2).map_err(|_| too_large())?;

        let mut filled = value.filled().iter();
        let mut data = vec![0; byte_len(dim_1, dim_2, dim_3)];

        data.iter_mut().for_each(|v| {
            for s in 0..8 {
                if let Some(true) = filled.next() {
                    *v |= 1 << s;
                }
            }
        });

        Ok(Self {
            dim_1,
            dim_2,
            dim_3,
            data,
        })
    }
}

impl From<&'_ PackedShape> for Shape {
    fn from(value: &'_ PackedShape) -> Self {
        let (dim_1, dim_2, dim_3) = (
            value.dim_1 as usize,
            value.dim_2 as usize,
            value.dim_3 as usize,
        );
        let len = dim_1 * dim_2 * dim_3;

        let filled = (0..len)
            .map(|idx| (value.data[idx / 8] >> (idx % 8)) & 0x1 == 0x1)
            .collect();

        Shape::new_raw(dim_1, dim_2, dim_3, filled)
    }
}

#[test]
pub fn from_bytes() {
    let bytes: Vec<u8> = vec![0x02, 0x01, 0x03, 0x25];

    let packed = PackedShape::unpack(&*bytes).unwrap();
    let shape = Shape::from(&packed);

    assert_eq!(shape.dims(), (2, 1, 3));
    assert_eq!(
        shape.occupied().collect::<Vec<_>>(),
        vec![(0, 0, 0), (0, 0, 2), (1, 0, 2)]
    );

    assert_eq!(PackedShape::try_from(&shape).unwrap(), packed);

    let mut to_bytes = Vec::new();
    packed.pack(&mut to_bytes).unwrap();

    assert_eq!(bytes, to_bytes);
}

#[test]
pub fn rejects_wrong_data_length() {
    assert!(PackedShape::new(2, 2, 2, &[0x01, 0x02]).is_none());
    assert!(PackedShape::new(3, 3, 1, &[0xFF, 0x01]).is_some());
}

#[test]
pub fn too_large_to_pack() {
    let shape = Shape::new(256, 1, 1);

    assert_eq!(
        PackedShape::try_from(&shape),
        Err(ShapeError::TooLarge {
            dims: (256, 1, 1)
        })
    );
}
