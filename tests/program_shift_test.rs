use curriculum_engine::{CurriculumStore, EngineConfig, LocalStorage, Program};
use tempfile::TempDir;

const COURSES: &str = "\
1,1,GEMATH,Mathematics in the Modern World,3
1,1,IT 111,Introduction to Computing,3
1,2,IT 112,Computer Programming 1,3
2,1,IT 211,Data Structures,3
";

fn open_store() -> (TempDir, CurriculumStore<LocalStorage>) {
    let temp_dir = TempDir::new().unwrap();
    let catalog_dir = temp_dir.path().join("catalog");
    std::fs::create_dir_all(&catalog_dir).unwrap();
    std::fs::write(catalog_dir.join("bsit_courses.csv"), COURSES).unwrap();

    let config = EngineConfig::with_dirs("catalog", "data");
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let store = CurriculumStore::open(storage, &config, "2216549", Program::Bsit).unwrap();
    (temp_dir, store)
}

#[test]
fn test_shift_switches_to_partner_program() {
    let (_dir, mut store) = open_store();

    let target = store.shift_program().unwrap();
    assert_eq!(target, Program::Bscs);
    assert_eq!(store.program(), Program::Bscs);

    // Shifting again returns to the source track.
    assert_eq!(store.shift_program().unwrap(), Program::Bsit);
}

#[test]
fn test_shift_renames_snapshot_to_new_key() {
    let (temp_dir, mut store) = open_store();
    assert!(temp_dir.path().join("data/2216549-bsit.json").exists());

    store.shift_program().unwrap();

    assert!(!temp_dir.path().join("data/2216549-bsit.json").exists());
    assert!(temp_dir.path().join("data/2216549-bscs.json").exists());
}

#[test]
fn test_shift_remaps_prefixed_codes_only() {
    let (_dir, mut store) = open_store();

    store.shift_program().unwrap();

    assert!(store.course("CS 111").is_some());
    assert!(store.course("CS 112").is_some());
    assert!(store.course("IT 111").is_none());
    // Codes without the subject prefix are untouched.
    assert!(store.course("GEMATH").is_some());
}

#[test]
fn test_shift_remaps_prefix_once_per_code() {
    let (_dir, mut store) = open_store();
    store
        .add_course(2, 1, "IT 2IT", "Audit Elective", 3.0, 0.0)
        .unwrap();

    store.shift_program().unwrap();

    // Only the leading occurrence of the prefix is rewritten.
    assert!(store.course("CS 2IT").is_some());
}

#[test]
fn test_shift_marks_ungraded_duplicate_of_graded_code_enrolled() {
    let (_dir, mut store) = open_store();
    store.edit_grade("IT 112", 80.0, true).unwrap();
    // A CS-prefixed duplicate of the same course, not yet graded.
    store
        .add_course(1, 2, "CS 112", "Computer Programming 1", 3.0, 0.0)
        .unwrap();

    store.shift_program().unwrap();

    // The graded IT 112 record became CS 112 as well; only the ungraded
    // duplicate is re-marked as currently enrolled.
    let records: Vec<_> = store
        .courses()
        .iter()
        .filter(|c| c.matches_code("CS 112"))
        .collect();
    assert_eq!(records.len(), 2);

    let graded = records.iter().find(|c| c.grade.is_some()).unwrap();
    let ungraded = records.iter().find(|c| c.grade.is_none()).unwrap();
    assert!(!graded.enrolled);
    assert!(ungraded.enrolled);
}

#[test]
fn test_shift_does_not_mark_lone_records() {
    let (_dir, mut store) = open_store();
    store.edit_grade("IT 112", 80.0, true).unwrap();

    store.shift_program().unwrap();

    // No record matches a *different* graded record, so nothing is
    // re-marked.
    assert!(store.courses().iter().all(|c| !c.enrolled));
}

#[test]
fn test_shift_survives_missing_snapshot_file() {
    let (temp_dir, mut store) = open_store();
    std::fs::remove_file(temp_dir.path().join("data/2216549-bsit.json")).unwrap();

    // The rename fails, is reported, and the shift still completes and
    // persists under the new key.
    store.shift_program().unwrap();
    assert_eq!(store.program(), Program::Bscs);
    assert!(temp_dir.path().join("data/2216549-bscs.json").exists());
}

#[test]
fn test_shifted_store_reopens_under_new_key() {
    let (temp_dir, mut store) = open_store();
    store.edit_grade("GEMATH", 90.0, true).unwrap();
    store.shift_program().unwrap();
    drop(store);

    let config = EngineConfig::with_dirs("catalog", "data");
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let reopened = CurriculumStore::open(storage, &config, "2216549", Program::Bscs).unwrap();

    assert_eq!(reopened.program(), Program::Bscs);
    assert_eq!(reopened.course("GEMATH").unwrap().grade, Some(90.0));
    assert!(reopened.course("CS 111").is_some());
}

#[test]
fn test_add_course_grades_enrolled_record_in_place() {
    let (_dir, mut store) = open_store();
    store.edit_grade("IT 112", 80.0, true).unwrap();
    store
        .add_course(1, 2, "CS 112", "Computer Programming 1", 3.0, 0.0)
        .unwrap();
    store.shift_program().unwrap();

    // After the shift, the ungraded duplicate is marked enrolled; grading
    // it through add_course records in place rather than inserting a third
    // record.
    let before = store.courses().len();
    store
        .add_course(1, 2, "CS 112", "Computer Programming 1", 3.0, 85.0)
        .unwrap();
    assert_eq!(store.courses().len(), before);

    let enrolled_left = store
        .courses()
        .iter()
        .filter(|c| c.matches_code("CS 112") && c.enrolled)
        .count();
    assert_eq!(enrolled_left, 0);
}
