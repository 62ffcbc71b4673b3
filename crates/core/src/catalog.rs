//! Piece catalog - static polyomino templates
//!
//! Shapes are grouped into five size categories (1 to 5 cells). Each category has a
//! fixed relative spawn weight; selection itself lives in the generator.
//!
//! Offsets are `(row, col)` and every shape is normalized so its minimum row and
//! minimum column are both 0.

/// Offset of a single cell relative to the piece origin
pub type CellOffset = (i8, i8);

/// A polyomino template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub name: &'static str,
    pub cells: &'static [CellOffset],
}

impl Shape {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Shapes sharing a cell count, with their spawn weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeCategory {
    pub cell_count: usize,
    pub weight: u32,
    pub shapes: &'static [Shape],
}

const fn shape(name: &'static str, cells: &'static [CellOffset]) -> Shape {
    Shape { name, cells }
}

const MONO: &[Shape] = &[shape("dot", &[(0, 0)])];

const DOMINO: &[Shape] = &[
    shape("i2_h", &[(0, 0), (0, 1)]),
    shape("i2_v", &[(0, 0), (1, 0)]),
];

const TROMINO: &[Shape] = &[
    shape("i3_h", &[(0, 0), (0, 1), (0, 2)]),
    shape("i3_v", &[(0, 0), (1, 0), (2, 0)]),
    shape("l3_a", &[(0, 0), (1, 0), (1, 1)]),
    shape("l3_b", &[(0, 0), (0, 1), (1, 0)]),
    shape("l3_c", &[(0, 0), (0, 1), (1, 1)]),
    shape("l3_d", &[(0, 1), (1, 0), (1, 1)]),
];

const TETROMINO: &[Shape] = &[
    shape("i4_h", &[(0, 0), (0, 1), (0, 2), (0, 3)]),
    shape("i4_v", &[(0, 0), (1, 0), (2, 0), (3, 0)]),
    shape("o4", &[(0, 0), (0, 1), (1, 0), (1, 1)]),
    shape("t4_n", &[(0, 0), (0, 1), (0, 2), (1, 1)]),
    shape("t4_e", &[(0, 1), (1, 0), (1, 1), (2, 1)]),
    shape("t4_s", &[(0, 1), (1, 0), (1, 1), (1, 2)]),
    shape("t4_w", &[(0, 0), (1, 0), (1, 1), (2, 0)]),
    shape("s4_h", &[(0, 1), (0, 2), (1, 0), (1, 1)]),
    shape("s4_v", &[(0, 0), (1, 0), (1, 1), (2, 1)]),
    shape("z4_h", &[(0, 0), (0, 1), (1, 1), (1, 2)]),
    shape("z4_v", &[(0, 1), (1, 0), (1, 1), (2, 0)]),
    shape("l4_n", &[(0, 0), (1, 0), (2, 0), (2, 1)]),
    shape("l4_e", &[(0, 0), (0, 1), (0, 2), (1, 0)]),
    shape("l4_s", &[(0, 0), (0, 1), (1, 1), (2, 1)]),
    shape("l4_w", &[(0, 2), (1, 0), (1, 1), (1, 2)]),
    shape("j4_n", &[(0, 1), (1, 1), (2, 0), (2, 1)]),
    shape("j4_e", &[(0, 0), (1, 0), (1, 1), (1, 2)]),
    shape("j4_s", &[(0, 0), (0, 1), (1, 0), (2, 0)]),
    shape("j4_w", &[(0, 0), (0, 1), (0, 2), (1, 2)]),
];

const PENTOMINO: &[Shape] = &[
    shape("i5_h", &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]),
    shape("i5_v", &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
    shape("plus", &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]),
    shape("v5_a", &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]),
    shape("v5_b", &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)]),
    shape("v5_c", &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]),
    shape("v5_d", &[(0, 2), (1, 2), (2, 0), (2, 1), (2, 2)]),
    shape("u5_n", &[(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)]),
    shape("u5_s", &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2)]),
];

/// The full catalog in selection order.
///
/// Relative weights: 1-cell 10, 2-cell 15, 3-cell 30, 4-cell 30, 5-cell 15.
pub static CATALOG: [ShapeCategory; 5] = [
    ShapeCategory {
        cell_count: 1,
        weight: 10,
        shapes: MONO,
    },
    ShapeCategory {
        cell_count: 2,
        weight: 15,
        shapes: DOMINO,
    },
    ShapeCategory {
        cell_count: 3,
        weight: 30,
        shapes: TROMINO,
    },
    ShapeCategory {
        cell_count: 4,
        weight: 30,
        shapes: TETROMINO,
    },
    ShapeCategory {
        cell_count: 5,
        weight: 15,
        shapes: PENTOMINO,
    },
];

/// Categories whose shapes have at least `min_cells` cells, in catalog order
pub fn categories_with_min_cells(min_cells: usize) -> impl Iterator<Item = &'static ShapeCategory> {
    CATALOG.iter().filter(move |cat| cat.cell_count >= min_cells)
}

/// Look a shape up by name
pub fn find_shape(name: &str) -> Option<Shape> {
    CATALOG
        .iter()
        .flat_map(|cat| cat.shapes.iter())
        .find(|shape| shape.name == name)
        .copied()
}
