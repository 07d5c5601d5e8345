use std::collections::HashSet;

use crate::{
    error::{EmptyShapeError, ShapeError},
    packing::PackedShape,
    shape::Shape,
};

fn test_shape() -> Shape {
    let mut shape = Shape::new(2, 3, 4);

    shape.set(0, 0, 1).unwrap();
    shape.set(0, 0, 3).unwrap();

    shape.set(0, 1, 0).unwrap();
    shape.set(0, 1, 1).unwrap();
    shape.set(0, 1, 2).unwrap();
    shape.set(0, 1, 3).unwrap();

    shape.set(1, 0, 0).unwrap();
    shape.set(1, 0, 1).unwrap();

    shape.set(1, 1, 0).unwrap();
    shape.set(1, 1, 2).unwrap();

    shape.set(1, 2, 0).unwrap();
    shape.set(1, 2, 3).unwrap();

    shape
}

fn single_cube() -> Shape {
    Shape::from_cells([(0, 0, 0)]).unwrap()
}

#[test]
pub fn from_vec3d() {
    let shape = test_shape();

    #[rustfmt::skip]
    let expected = Shape::try_from(vec![
        vec![
            vec![false, true,  false, true ],
            vec![true,  true,  true,  true ],
            vec![false, false, false, false],
        ],
        vec![
            vec![true,  true,  false, false],
            vec![true,  false, true,  false],
            vec![true,  false, false, true ],
        ]
    ]).unwrap();

    assert_eq!(shape, expected);
    assert_eq!(shape.present_cubes(), 12);
}

#[test]
fn from_vec3d_ragged() {
    #[rustfmt::skip]
    let ragged = Shape::try_from(vec![
        vec![
            vec![true, false],
            vec![true],
        ],
    ]);

    assert_eq!(ragged, Err(ShapeError::Ragged));
}

#[test]
fn from_filled_wrong_length() {
    let result = Shape::from_filled(2, 2, 2, vec![true; 7]);

    assert_eq!(
        result,
        Err(ShapeError::DataLength {
            expected: 8,
            actual: 7
        })
    );
}

#[test]
fn from_cells_empty() {
    let result = Shape::from_cells(std::iter::empty::<(usize, usize, usize)>());

    assert_eq!(result, Err(ShapeError::Empty(EmptyShapeError)));
}

#[test]
fn set_out_of_bounds() {
    let mut shape = Shape::new(1, 2, 3);

    assert_eq!(
        shape.set(0, 2, 0),
        Err(ShapeError::OutOfBounds {
            coordinate: (0, 2, 0),
            dims: (1, 2, 3)
        })
    );
    assert!(!shape.is_set(5, 5, 5));
}

#[test]
fn parse_display_output() {
    let shape = test_shape();

    let text = format!("{shape}");
    let parsed: Shape = text.parse().unwrap();

    assert_eq!(parsed, shape);
}

#[test]
fn parse_by_hand() {
    let parsed: Shape = "--\n10\n11\n--".parse().unwrap();

    assert_eq!(parsed.dims(), (1, 2, 2));
    assert_eq!(
        parsed.occupied().collect::<Vec<_>>(),
        vec![(0, 0, 0), (0, 1, 0), (0, 1, 1)]
    );
}

#[test]
fn parse_rejects_garbage() {
    assert!(matches!("--\n1x\n--".parse::<Shape>(), Err(ShapeError::Parse(_))));
    assert!(matches!("".parse::<Shape>(), Err(ShapeError::Parse(_))));
}

#[test]
fn pad_one() {
    let shape = test_shape();
    let padded = shape.pad_one();

    assert_eq!(padded.dims(), (4, 5, 6));
    assert_eq!(padded.present_cubes(), shape.present_cubes());
    assert!(!padded.is_cropped());

    for (d1, d2, d3) in shape.occupied() {
        assert!(padded.is_set(d1 + 1, d2 + 1, d3 + 1));
    }
}

#[test]
fn bounding_box() {
    let mut shape = Shape::new(4, 4, 4);
    shape.set(1, 3, 2).unwrap();
    shape.set(2, 1, 2).unwrap();

    let bounds = shape.bounding_box().unwrap();

    assert_eq!(bounds.min, (1, 1, 2));
    assert_eq!(bounds.max, (2, 3, 2));
    assert_eq!(bounds.dims(), (2, 3, 1));
}

#[test]
fn crop() {
    #[rustfmt::skip]
    let input = Shape::try_from(vec![
        vec![
            vec![false, false, true, false],
            vec![false, false, false, false],
        ],
        vec![
            vec![false, true, false, false],
            vec![false, true, true, false],
        ],
    ]).unwrap();

    #[rustfmt::skip]
    let expected = Shape::try_from(vec![
        vec![
            vec![false, true],
            vec![false, false],
        ],
        vec![
            vec![true, false],
            vec![true, true],
        ],
    ]).unwrap();

    let cropped = input.crop().unwrap();

    assert_eq!(cropped, expected);
    assert_eq!(cropped.present_cubes(), input.present_cubes());
    assert!(cropped.is_cropped());
    assert!(!input.is_cropped());
}

#[test]
fn crop_is_idempotent() {
    let mut shape = Shape::new(5, 4, 6);
    shape.set(1, 1, 1).unwrap();
    shape.set(1, 2, 1).unwrap();
    shape.set(3, 2, 4).unwrap();

    let once = shape.crop().unwrap();
    let twice = once.crop().unwrap();

    assert_eq!(once.dims(), (3, 2, 4));
    assert_eq!(once, twice);
    assert_eq!(once.present_cubes(), 3);
}

#[test]
fn crop_already_cropped() {
    let shape = test_shape();

    assert!(shape.is_cropped());
    assert_eq!(shape.crop().unwrap(), shape);
}

#[test]
fn crop_empty() {
    assert_eq!(Shape::new(2, 3, 4).crop(), Err(EmptyShapeError));
    assert_eq!(Shape::new(0, 0, 0).crop(), Err(EmptyShapeError));
    assert!(!Shape::new(2, 3, 4).is_cropped());
}

#[test]
fn frontier_single_cube() {
    let frontier = single_cube().frontier();

    assert_eq!(
        frontier,
        vec![
            (0, 1, 1),
            (1, 0, 1),
            (1, 1, 0),
            (1, 1, 2),
            (1, 2, 1),
            (2, 1, 1)
        ]
    );
}

/// Cell (0, 1, 0) touches two cubes of the L, but is only part of the
/// frontier once.
#[test]
fn frontier_shared_neighbour() {
    let l_shape = Shape::from_cells([(0, 0, 0), (1, 0, 0), (1, 1, 0)]).unwrap();

    assert_eq!(l_shape.frontier().len(), 13);
    assert_eq!(l_shape.expand().unwrap().count(), 13);
}

#[test]
fn expand_single_cube() {
    let expansions: Vec<_> = single_cube().expand().unwrap().collect();

    assert_eq!(expansions.len(), 6);

    for expansion in &expansions {
        assert_eq!(expansion.present_cubes(), 2);
        assert!(expansion.is_cropped());
        assert_eq!(expansion.volume(), 2);
    }

    let dims: Vec<_> = expansions.iter().map(Shape::dims).collect();
    assert_eq!(
        dims,
        vec![
            (2, 1, 1),
            (1, 2, 1),
            (1, 1, 2),
            (1, 1, 2),
            (1, 2, 1),
            (2, 1, 1)
        ]
    );

    // Growing in opposite directions gives the same shape, but both are
    // yielded.
    let unique: HashSet<_> = expansions.into_iter().collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn expand_line_of_two() {
    let line = Shape::from_cells([(0, 0, 0), (1, 0, 0)]).unwrap();

    let expansions: Vec<_> = line.expand().unwrap().collect();

    assert_eq!(expansions.len(), 10);
    for expansion in expansions {
        assert_eq!(expansion.present_cubes(), 3);
        assert!(expansion.is_cropped());
    }
}

#[test]
fn expand_uncropped_input() {
    let shape = Shape::from_cells([(1, 1, 1)]).unwrap();
    assert!(!shape.is_cropped());

    let expansions: Vec<_> = shape.expand().unwrap().collect();
    let from_cropped: Vec<_> = single_cube().expand().unwrap().collect();

    assert_eq!(expansions, from_cropped);
}

#[test]
fn expand_test_shape() {
    let shape = test_shape();
    let before = shape.clone();

    let expansions = shape.expand().unwrap();
    assert_eq!(expansions.len(), shape.frontier().len());

    for expansion in expansions {
        assert_eq!(expansion.present_cubes(), shape.present_cubes() + 1);
        assert!(expansion.is_cropped());
    }

    assert_eq!(shape, before);
}

#[test]
fn expand_empty() {
    assert!(Shape::new(3, 3, 3).expand().is_err());
    assert!(Shape::new(3, 3, 3).expand_par().is_err());
}

#[test]
fn expand_stops_early() {
    let mut expansions = single_cube().expand().unwrap();

    let first = expansions.next().unwrap();
    assert_eq!(expansions.len(), 5);

    let resumed = expansions.clone();
    let rest: Vec<_> = expansions.collect();
    let rest_of_clone: Vec<_> = resumed.collect();

    assert_eq!(rest, rest_of_clone);
    assert_eq!(rest.len(), 5);
    assert_eq!(first.dims(), (2, 1, 1));
}

#[test]
fn expand_par_matches_expand() {
    let shape = test_shape();

    let sequential: Vec<_> = shape.expand().unwrap().collect();
    let parallel = shape.expand_par().unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn free_functions() {
    let shape = test_shape().pad_one();

    assert_eq!(crate::crop(&shape).unwrap(), test_shape());
    assert_eq!(
        crate::expand(&shape).unwrap().collect::<Vec<_>>(),
        test_shape().expand().unwrap().collect::<Vec<_>>()
    );
}

#[test]
fn packing_is_unique() {
    let expansions: HashSet<_> = test_shape().expand().unwrap().collect();

    let packed: HashSet<_> = expansions
        .iter()
        .map(|v| PackedShape::try_from(v).unwrap())
        .collect();

    assert_eq!(packed.len(), expansions.len());

    for packed in &packed {
        let mut bytes = Vec::new();
        packed.pack(&mut bytes).unwrap();

        let unpacked = PackedShape::unpack(&*bytes).unwrap();
        assert_eq!(&unpacked, packed);
        assert!(expansions.contains(&Shape::from(&unpacked)));
    }
}

#[test]
fn oversized_dimensions() {
    let too_large = |result: Result<Shape, ShapeError>| {
        matches!(result, Err(ShapeError::TooLarge { .. }))
    };

    assert!(too_large(Shape::from_cells([(usize::MAX, 0, 0)])));
    assert!(too_large(Shape::from_cells([(0, usize::MAX, usize::MAX)])));
    assert!(too_large(Shape::from_filled(usize::MAX, 2, 1, vec![])));
    assert!(too_large(Shape::try_new(usize::MAX - 1, 0, 1)));
    assert!(too_large(Shape::from_cells([(1_000_000, 1_000_000, 1_000_000)])));

    assert_eq!(Shape::try_new(2, 3, 4).unwrap(), Shape::new(2, 3, 4));
}

/// Each of the six outer planes of `shape` has at least one cube.
fn assert_faces_occupied(shape: &Shape) {
    let (d1, d2, d3) = shape.dims();
    let mut faces = [false; 6];

    for x in 0..d1 {
        for y in 0..d2 {
            for z in 0..d3 {
                if shape.is_set(x, y, z) {
                    faces[0] |= x == 0;
                    faces[1] |= x == d1 - 1;
                    faces[2] |= y == 0;
                    faces[3] |= y == d2 - 1;
                    faces[4] |= z == 0;
                    faces[5] |= z == d3 - 1;
                }
            }
        }
    }

    assert_eq!(faces, [true; 6], "empty face in\n{shape}");
}

#[test]
fn cropped_faces_are_occupied() {
    let mut shape = Shape::new(6, 5, 7);
    shape.set(1, 2, 3).unwrap();
    shape.set(2, 2, 3).unwrap();
    shape.set(2, 3, 3).unwrap();
    shape.set(2, 3, 4).unwrap();

    let cropped = shape.crop().unwrap();
    assert_eq!(cropped.dims(), (2, 2, 2));
    assert_faces_occupied(&cropped);

    assert_faces_occupied(&test_shape().pad_one().crop().unwrap());

    for expansion in test_shape().expand().unwrap() {
        assert_faces_occupied(&expansion);
    }
}
