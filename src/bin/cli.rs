use clap::Parser;
use gridlock::cnf::check_assignment;
use gridlock::dimacs::{clauses_from_dimacs_file, solution_to_dimacs, DimacsFile};
use gridlock::solver::config::Config;
use gridlock::solver::Solver;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a DIMACS CNF file, optionally gzip-compressed
    #[arg(index = 1)]
    file: String,

    /// Also write the result to this path
    #[arg(short, long)]
    out: Option<String>,

    /// Print a live progress table to stderr
    #[arg(short, long)]
    progress: bool,

    /// Print solver statistics to stderr
    #[arg(short, long)]
    stats: bool,
}

fn main() {
    let args = Args::parse();

    let cnf = match clauses_from_dimacs_file(&args.file) {
        Ok(cnf) => cnf,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let mut solver = Solver::new(&cnf.clauses, cnf.num_vars, Config::new(args.progress));
    let solution = solver.solve();

    if let Some(assignment) = &solution {
        if !check_assignment(&cnf.clauses, assignment) {
            eprintln!("Internal error: solution failed verification");
            std::process::exit(2);
        }
    }

    if args.stats {
        eprintln!("{}", solver.stats().to_table());
    }

    let result = solution_to_dimacs(&solution, cnf.num_vars);
    println!("{}", result);

    if let Some(out) = &args.out {
        if let Err(err) = std::fs::write(out, format!("{}\n", result)) {
            eprintln!("Error: could not write {}: {}", out, err);
            std::process::exit(1);
        }
    }

    if solution.is_some() {
        print_sudoku(&cnf, &solution);
    }
}

/// Decodes and prints the Sudoku grid when the CNF carried the metadata.
fn print_sudoku(cnf: &DimacsFile, solution: &gridlock::cnf::Solution) {
    if !cnf.puzzle.is_present() {
        return;
    }
    let Some(assignment) = solution else { return };

    let (grid, conflicts) = cnf.puzzle.decode(assignment);
    for conflict in &conflicts {
        eprintln!("{}", conflict);
    }
    if !conflicts.is_empty() {
        eprintln!("WARNING: {} decode conflicts detected.", conflicts.len());
    }

    println!("\nSudoku solution ({}x{}):\n", grid.size(), grid.size());
    print!("{}", grid);
}
