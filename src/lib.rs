extern crate repng;

use std::{
	io,
	fs::File,
	fmt,
};

/// Grain count of a single cell.
pub type Grains = u32;

const TOPPLE_AT: Grains = 4;

const SIZE_ERR_MSG: &str = "Board size must be positive.";

/// Bounded square store of grain counts. Out-of-bounds coordinates are
/// not an error: reads report no cell, writes are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
	size: usize,
	cells: Vec<Vec<Grains>>,
}

impl Grid {
	pub fn new(size: usize) -> Result<Grid, &'static str> {
		if size == 0 {
			return Err(SIZE_ERR_MSG);
		}
		Ok(Grid {
			size,
			cells: vec![vec![0; size]; size],
		})
	}

	pub fn size(&self) -> usize {
		self.size
	}

	pub fn contains(&self, r: isize, c: isize) -> bool {
		r >= 0 && c >= 0 && (r as usize) < self.size && (c as usize) < self.size
	}

	pub fn get(&self, r: isize, c: isize) -> Option<Grains> {
		if self.contains(r, c) {
			Some(self.cells[r as usize][c as usize])
		} else {
			None
		}
	}

	pub fn set(&mut self, r: isize, c: isize, value: Grains) {
		if self.contains(r, c) {
			self.cells[r as usize][c as usize] = value;
		}
	}

	/// Total grains on the board.
	pub fn total(&self) -> u64 {
		self.cells.iter().flatten().map(|&g| g as u64).sum()
	}
}

impl fmt::Display for Grid {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let vis = [" ", ".", ":", "&"];
		for row in &self.cells {
			for el in row {
				write!(f, "{}", vis[(*el).min(3) as usize])?;
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

/// A sandpile mid-cascade: the grid plus the agenda of cells pending
/// a re-check for instability.
#[derive(Debug, Clone)]
pub struct Board {
	grid: Grid,
	agenda: Vec<(usize, usize)>,
	topples: u64,
}

impl Board {
	/// Fresh board with `pile` grains dropped at the center.
	pub fn new(size: usize, pile: Grains) -> Result<Board, &'static str> {
		let mut grid = Grid::new(size)?;
		let center = size / 2;
		grid.set(center as isize, center as isize, pile);
		let mut agenda = Vec::new();
		if pile >= TOPPLE_AT {
			agenda.push((center, center));
		}
		Ok(Board {
			grid,
			agenda,
			topples: 0,
		})
	}

	pub fn grid(&self) -> &Grid {
		&self.grid
	}

	pub fn into_grid(self) -> Grid {
		self.grid
	}

	/// Number of topples performed so far.
	pub fn topples(&self) -> u64 {
		self.topples
	}

	pub fn is_converged(&self) -> bool {
		self.agenda.is_empty()
	}

	/// Drains the agenda, toppling until every cell holds fewer than 4
	/// grains. Finite: mass is conserved in the interior and lost at the
	/// boundary, so no infinite cascade exists.
	pub fn stabilize(&mut self) {
		while let Some((r, c)) = self.agenda.pop() {
			// the count may have changed since the cell was enqueued
			if self.grid.cells[r][c] >= TOPPLE_AT {
				self.topple(r, c);
			}
		}
	}

	fn topple(&mut self, r: usize, c: usize) {
		debug_assert!(self.grid.cells[r][c] >= TOPPLE_AT, "topple invoked on a stable cell");
		self.grid.cells[r][c] -= TOPPLE_AT;
		self.topples += 1;
		if self.grid.cells[r][c] >= TOPPLE_AT {
			self.agenda.push((r, c));
		}
		self.feed(r as isize - 1, c as isize);
		self.feed(r as isize + 1, c as isize);
		self.feed(r as isize, c as isize - 1);
		self.feed(r as isize, c as isize + 1);
	}

	// One grain lands in (r, c). Crossing the threshold is the only
	// moment a neighbor is enqueued, so each unstable cell has exactly
	// one pending entry. Grains pushed off the edge are lost.
	fn feed(&mut self, r: isize, c: isize) {
		if !self.grid.contains(r, c) {
			return;
		}
		let (r, c) = (r as usize, c as usize);
		self.grid.cells[r][c] += 1;
		if self.grid.cells[r][c] == TOPPLE_AT {
			self.agenda.push((r, c));
		}
	}
}

/// Drops `pile` grains at the center of a fresh `size` x `size` board
/// and runs the cascade to completion.
pub fn steady_state(size: usize, pile: Grains) -> Result<Grid, &'static str> {
	let mut board = Board::new(size, pile)?;
	board.stabilize();
	Ok(board.into_grid())
}

pub fn png(grid: &Grid, fname: &str) -> Result<(), io::Error> {
	let colors = [
		[0, 0, 0, 255],
		[85, 85, 85, 255],
		[170, 170, 170, 255],
		[255, 255, 255, 255],
	];
	let mut pixels = vec![0; grid.size * grid.size * 4];
	let mut p = 0;
	for row in &grid.cells {
		for el in row {
			pixels[p..p+4].copy_from_slice(&colors[(*el).min(3) as usize]);
			p += 4;
		}
	}
	repng::encode(File::create(fname)?, grid.size as u32, grid.size as u32, &pixels)
}
