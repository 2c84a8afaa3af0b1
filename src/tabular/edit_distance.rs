// Edit distance driver
// Levenshtein tabulation with a fixed tie-break, plus matching script reconstruction

use crate::trace::{CellOp, EditOp, Recorder, Snapshot, StepEvent, TableSnapshot};

/// Fill the `(m+1) x (n+1)` cost table and reconstruct one shortest edit script
///
/// Everything about the order is fixed so the trace is deterministic: cells
/// are filled row-major; on equal cost the operation priority is replace,
/// then insert, then delete; the reconstruction walk prefers diagonal-match,
/// diagonal-replace, delete, insert. The walk priority mirrors the fill
/// priority, otherwise the reported script could disagree with the recorded
/// cell operations.
pub fn run_edit_distance(source: &str, target: &str, recorder: &mut Recorder) {
    let source_chars: Vec<char> = source.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();
    let m = source_chars.len();
    let n = target_chars.len();

    // Boundary row and column: cost of transforming to/from the empty string.
    let mut cells: Vec<Vec<Option<u32>>> = vec![vec![None; n + 1]; m + 1];
    for (i, row) in cells.iter_mut().enumerate() {
        row[0] = Some(i as u32);
    }
    for j in 0..=n {
        cells[0][j] = Some(j as u32);
    }

    let mut traceback: Vec<(usize, usize)> = Vec::new();
    recorder.record(
        StepEvent::TableInit { rows: m + 1, cols: n + 1 },
        snapshot(source, target, &cells, &traceback),
    );

    // Fill pass, strict row-major order.
    for i in 1..=m {
        for j in 1..=n {
            recorder.attempt();
            let (value, op) = if source_chars[i - 1] == target_chars[j - 1] {
                (cell(&cells, i - 1, j - 1), CellOp::Match)
            } else {
                let replace = cell(&cells, i - 1, j - 1) + 1;
                let insert = cell(&cells, i, j - 1) + 1;
                let delete = cell(&cells, i - 1, j) + 1;
                let best = replace.min(insert).min(delete);
                if best == replace {
                    (best, CellOp::Replace)
                } else if best == insert {
                    (best, CellOp::Insert)
                } else {
                    (best, CellOp::Delete)
                }
            };
            cells[i][j] = Some(value);
            recorder.record(
                StepEvent::TableFill { row: i, col: j, value, op },
                snapshot(source, target, &cells, &traceback),
            );
        }
    }

    // Reconstruction walk from (m, n) back to (0, 0), one step per move.
    let distance = cell(&cells, m, n);
    let mut script: Vec<EditOp> = Vec::new();
    let (mut i, mut j) = (m, n);

    while i > 0 || j > 0 {
        let (row, col) = (i, j);
        traceback.push((row, col));

        let op = if i > 0 && j > 0 && source_chars[i - 1] == target_chars[j - 1] {
            script.push(EditOp::Keep { ch: source_chars[i - 1] });
            i -= 1;
            j -= 1;
            CellOp::Match
        } else if i > 0 && j > 0 && cell(&cells, i, j) == cell(&cells, i - 1, j - 1) + 1 {
            script.push(EditOp::Replace {
                from: source_chars[i - 1],
                to: target_chars[j - 1],
            });
            i -= 1;
            j -= 1;
            CellOp::Replace
        } else if i > 0 && cell(&cells, i, j) == cell(&cells, i - 1, j) + 1 {
            script.push(EditOp::Delete { ch: source_chars[i - 1] });
            i -= 1;
            CellOp::Delete
        } else {
            script.push(EditOp::Insert { ch: target_chars[j - 1] });
            j -= 1;
            CellOp::Insert
        };

        recorder.key_op();
        recorder.record(
            StepEvent::TraceBack { row, col, op },
            snapshot(source, target, &cells, &traceback),
        );
    }

    traceback.push((0, 0));
    script.reverse();
    recorder.record(
        StepEvent::ScriptReady { distance, script },
        snapshot(source, target, &cells, &traceback),
    );
}

// The fill order guarantees every dependency is already Some.
fn cell(cells: &[Vec<Option<u32>>], i: usize, j: usize) -> u32 {
    cells[i][j].unwrap_or(0)
}

fn snapshot(
    source: &str,
    target: &str,
    cells: &[Vec<Option<u32>>],
    traceback: &[(usize, usize)],
) -> Snapshot {
    Snapshot::Table(TableSnapshot {
        source: source.to_string(),
        target: target.to_string(),
        cells: cells.to_vec(),
        traceback: traceback.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{AlgorithmId, Trace};

    fn run(source: &str, target: &str) -> Trace {
        let mut recorder = Recorder::new(AlgorithmId::EditDistance);
        run_edit_distance(source, target, &mut recorder);
        recorder.finish()
    }

    fn final_script(trace: &Trace) -> (u32, Vec<EditOp>) {
        match &trace.last().unwrap().event {
            StepEvent::ScriptReady { distance, script } => (*distance, script.clone()),
            other => panic!("expected ScriptReady, got {:?}", other),
        }
    }

    fn replay(script: &[EditOp], source: &str) -> String {
        let mut out = String::new();
        let mut src = source.chars();
        for op in script {
            match op {
                EditOp::Keep { .. } => {
                    if let Some(c) = src.next() {
                        out.push(c);
                    }
                }
                EditOp::Replace { to, .. } => {
                    src.next();
                    out.push(*to);
                }
                EditOp::Insert { ch } => out.push(*ch),
                EditOp::Delete { .. } => {
                    src.next();
                }
            }
        }
        out
    }

    #[test]
    fn test_sunday_saturday_distance_is_three() {
        let trace = run("SUNDAY", "SATURDAY");
        let (distance, script) = final_script(&trace);
        assert_eq!(distance, 3);

        // The script replays the source into the target and spends exactly
        // `distance` operations doing it.
        assert_eq!(replay(&script, "SUNDAY"), "SATURDAY");
        let edits = script
            .iter()
            .filter(|op| !matches!(op, EditOp::Keep { .. }))
            .count();
        assert_eq!(edits, 3);
    }

    #[test]
    fn test_one_fill_step_per_interior_cell() {
        let trace = run("abc", "ab");
        let fills = trace
            .steps()
            .iter()
            .filter(|s| matches!(s.event, StepEvent::TableFill { .. }))
            .count();
        assert_eq!(fills, 3 * 2);
        assert!(matches!(trace.steps()[0].event, StepEvent::TableInit { rows: 4, cols: 3 }));
    }

    #[test]
    fn test_three_way_tie_picks_replace() {
        // At the last cell of "ab" vs "ba" all three candidates cost 2.
        let trace = run("ab", "ba");
        let last_fill = trace
            .steps()
            .iter()
            .rev()
            .find_map(|s| match s.event {
                StepEvent::TableFill { row: 2, col: 2, value, op } => Some((value, op)),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_fill, (2, CellOp::Replace));
    }

    #[test]
    fn test_identical_strings_keep_everything() {
        let trace = run("abc", "abc");
        let (distance, script) = final_script(&trace);
        assert_eq!(distance, 0);
        assert!(script.iter().all(|op| matches!(op, EditOp::Keep { .. })));

        // One traceback move per character, each counted as a key operation.
        assert_eq!(trace.last().unwrap().counters.key_ops, 3);
    }

    #[test]
    fn test_traceback_walk_is_recorded_in_the_snapshot() {
        let trace = run("ab", "b");
        let last = trace.last().unwrap();
        match &last.snapshot {
            Snapshot::Table(table) => {
                assert_eq!(table.traceback.first(), Some(&(2, 1)));
                assert_eq!(table.traceback.last(), Some(&(0, 0)));
            }
            other => panic!("expected table snapshot, got {:?}", other),
        }
    }
}
