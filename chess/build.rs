use std::path::Path;
use std::{env, io};

use rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

pub fn default_gen() -> impl RngCore {
    Xoshiro256PlusPlus::seed_from_u64(0x800D_BA5E_5EED_1234_u64)
}

mod zobrist {
    use std::io::{self, BufWriter, Write};
    use std::{fs, path::Path};

    use chessbot_base::types::Piece;
    use rand_core::RngCore;

    struct Zobrist {
        pieces: [[u64; 64]; Piece::COUNT],
        move_side: u64,
    }

    impl Zobrist {
        fn generate<R: RngCore>(gen: &mut R) -> Zobrist {
            let pieces = {
                let mut res = [[0_u64; 64]; Piece::COUNT];
                // Empty squares don't contribute to the hash.
                for sub in res.iter_mut().skip(1) {
                    for x in sub {
                        *x = gen.next_u64();
                    }
                }
                res
            };
            Zobrist {
                pieces,
                move_side: gen.next_u64(),
            }
        }

        fn generate_default() -> Zobrist {
            Self::generate(&mut super::default_gen())
        }

        fn output<W: Write>(&self, w: &mut W) -> io::Result<()> {
            writeln!(w, "const PIECES: [[u64; 64]; Piece::COUNT] = [")?;
            for (i, sub) in self.pieces.iter().enumerate() {
                writeln!(w, "    /*{:2}*/ [", i)?;
                for (i, hsh) in sub.iter().enumerate() {
                    writeln!(w, "        /*{:2}*/ {:#x},", i, hsh)?;
                }
                writeln!(w, "    ],")?;
            }
            writeln!(w, "];\n")?;

            writeln!(w, "pub const MOVE_SIDE: u64 = {:#x};", self.move_side)?;

            Ok(())
        }
    }

    pub fn gen(out_path: &Path) -> io::Result<()> {
        Zobrist::generate_default().output(&mut BufWriter::new(&fs::File::create(out_path)?))?;
        Ok(())
    }
}

mod offsets {
    use std::io::{self, BufWriter, Write};
    use std::{fs, path::Path};

    use chessbot_base::geometry;

    fn print_offsets<W: Write>(
        w: &mut W,
        name: &str,
        offs: &[(isize, isize)],
    ) -> io::Result<()> {
        writeln!(w, "pub const {}: [(isize, isize); {}] = [", name, offs.len())?;
        for (delta_file, delta_rank) in offs {
            writeln!(w, "    ({}, {}),", delta_file, delta_rank)?;
        }
        writeln!(w, "];")?;
        Ok(())
    }

    pub fn gen(out_path: &Path) -> io::Result<()> {
        let f = fs::File::create(out_path)?;
        let mut w = BufWriter::new(&f);

        let rook = geometry::reflections(1, 0);
        let bishop = geometry::reflections(1, 1);
        let knight = geometry::reflections(1, 2);
        let king: Vec<_> = rook.iter().chain(bishop.iter()).copied().collect();

        print_offsets(&mut w, "ROOK", &rook)?;
        writeln!(&mut w)?;
        print_offsets(&mut w, "BISHOP", &bishop)?;
        writeln!(&mut w)?;
        print_offsets(&mut w, "QUEEN", &king)?;
        writeln!(&mut w)?;
        print_offsets(&mut w, "KNIGHT", &knight)?;
        writeln!(&mut w)?;
        print_offsets(&mut w, "KING", &king)?;

        Ok(())
    }
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").unwrap();

    zobrist::gen(&Path::new(&out_dir).join("zobrist.rs"))?;
    offsets::gen(&Path::new(&out_dir).join("offsets.rs"))?;

    Ok(())
}
