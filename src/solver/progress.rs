use crate::solver::statistics::StateStatistics;
use colored::{ColoredString, Colorize};

/// Live search progress, written to stderr so stdout stays reserved for
/// the result.
pub struct Progress {
    time_of_last_print: std::time::Instant,
    last_num_conflicts: usize,
    last_num_learned: usize,
    last_trail_len: usize,
}

const PRINT_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5);

const TIME: usize = 6;
const CONFLICTS_TOTAL: usize = 15;
const CONFLICTS_DELTA: usize = 10;
const LEARNED_TOTAL: usize = 15;
const LEARNED_DELTA: usize = 10;
const TRAIL_CUR: usize = 12;
const TRAIL_DELTA: usize = 10;

impl Progress {
    pub fn new() -> Self {
        Self::print_header();
        Progress {
            time_of_last_print: std::time::Instant::now(),
            last_num_conflicts: 0,
            last_num_learned: 0,
            last_trail_len: 0,
        }
    }

    pub fn print_progress_if_necessary(&mut self, stats: &StateStatistics, trail_len: usize) {
        if self.time_of_last_print.elapsed() > PRINT_INTERVAL {
            self.print_progress(stats, trail_len);
            self.time_of_last_print = std::time::Instant::now();
        }
    }

    fn print_header() {
        let conflicts = CONFLICTS_TOTAL + CONFLICTS_DELTA + 1;
        let learned = LEARNED_TOTAL + LEARNED_DELTA + 1;
        let trail = TRAIL_CUR + TRAIL_DELTA + 1;
        eprintln!(
            "c ┌─{:─<TIME$}─┬─{:─<conflicts$}─┬─{:─<learned$}─┬─{:─<trail$}─┐",
            "", "", "", ""
        );
        eprintln!(
            "c │ {:<TIME$} │ {:<conflicts$} │ {:<learned$} │ {:<trail$} │",
            "Time", "Conflicts", "Learned", "Trail"
        );
        eprintln!(
            "c │┈{:┈<TIME$}┈│┈{:┈<CONFLICTS_TOTAL$}┈{:┈<CONFLICTS_DELTA$}┈│┈{:┈<LEARNED_TOTAL$}┈{:┈<LEARNED_DELTA$}┈│┈{:┈<TRAIL_CUR$}┈{:┈<TRAIL_DELTA$}┈│",
            "", "", "", "", "", "", ""
        );
    }

    fn print_progress(&mut self, stats: &StateStatistics, trail_len: usize) {
        eprintln!(
            "c │ {:>TIME$} │ {:>CONFLICTS_TOTAL$} {:<CONFLICTS_DELTA$} │ {:>LEARNED_TOTAL$} {:<LEARNED_DELTA$} │ {:>TRAIL_CUR$} {:<TRAIL_DELTA$} │",
            stats.start_time.elapsed().as_secs(),
            stats.num_conflicts,
            Self::print_delta(self.last_num_conflicts as i32, stats.num_conflicts as i32, false),
            stats.num_learned_clauses,
            Self::print_delta(self.last_num_learned as i32, stats.num_learned_clauses as i32, false),
            trail_len,
            Self::print_delta(self.last_trail_len as i32, trail_len as i32, true),
        );

        self.last_num_conflicts = stats.num_conflicts;
        self.last_num_learned = stats.num_learned_clauses;
        self.last_trail_len = trail_len;
    }

    pub fn close_table(&self) {
        let conflicts = CONFLICTS_TOTAL + CONFLICTS_DELTA + 1;
        let learned = LEARNED_TOTAL + LEARNED_DELTA + 1;
        let trail = TRAIL_CUR + TRAIL_DELTA + 1;
        eprintln!(
            "c └─{:─<TIME$}─┴─{:─<conflicts$}─┴─{:─<learned$}─┴─{:─<trail$}─┘",
            "", "", "", ""
        );
    }

    fn print_delta(old_value: i32, new_value: i32, use_colors: bool) -> ColoredString {
        let mut output = String::new();
        output.push('(');

        let delta = new_value - old_value;
        if delta >= 0 {
            output.push('+');
            output.push_str(&delta.to_string());
            output.push(')');
            if use_colors {
                return output.truecolor(0, 150, 0);
            }
        } else {
            output.push_str(&delta.to_string());
            output.push(')');
            if use_colors {
                return output.truecolor(150, 0, 0);
            }
        }
        output.truecolor(120, 120, 120)
    }
}
