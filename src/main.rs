use sandfall::{
	Board,
	Grains,
	png,
};

fn main() {
	let config = match Config::new(&mut std::env::args()) {
		Ok(config) => config,
		Err(e) => {
			println!("{}", e);
			return
		}
	};
	let mut board = match Board::new(config.size, config.pile) {
		Ok(board) => board,
		Err(e) => {
			println!("{}", e);
			return
		}
	};
	board.stabilize();
	if config.out_ascii {
		print!("{}", board.grid());
	}
	if config.topplings {
		println!("Topplings: {}", board.topples());
	}
	if let Some(filename) = config.out_png {
		if let Err(e) = png(board.grid(), &filename) {
			println!("Can't write to file {}. {}", filename, e);
		}
	}
}

#[derive(Debug)]
struct Config {
	size: usize,
	pile: Grains,
	out_ascii: bool,
	out_png: Option<String>,
	topplings: bool,
}

impl Config {
	fn new(args: &mut dyn Iterator<Item = String>) -> Result<Config, String> {
		args.next();
		let size = match args.next().map(|s| s.parse::<usize>()) {
			Some(Ok(x)) if x > 0 => x,
			_ => return Err("\
Please specify board size (a positive integer) as the 1st command line argument.
Example of a correct call (with cargo, use 'cargo run --release' instead of 'sandfall'):
sandfall 101 100000 ascii+png out/pile.png".to_owned())
		};
		let pile = match args.next().map(|s| s.parse::<Grains>()) {
			Some(Ok(n)) => n,
			_ => return Err("Please specify the number of grains dropped at the center (a 32-bit number) as the 2nd command line argument.".to_owned())
		};
		let mut out_ascii = false;
		let mut out_png = false;
		let mut topplings = false;
		match args.next() {
			Some(s) => for out in s.split('+') {
				match out {
					"ascii" => out_ascii = true,
					"png" => out_png = true,
					"topplings" => topplings = true,
					_ => return Err(format!("\
Expected output format: '+'-separated 'ascii', 'png', and/or 'topplings'.
Got: {}", out))
				}
			},
			None => return Err("Please specify desired output (e.g., 'png') as the 3rd command line argument.".to_owned())
		}
		let out_png = if out_png {
			match args.next() {
				Some(s) => Some(s),
				None => return Err("Please specify name for output png file as the final command line argument.".to_owned())
			}
		} else {
			None
		};
		Ok(Config {
			size,
			pile,
			out_ascii,
			out_png,
			topplings,
		})
	}
}
