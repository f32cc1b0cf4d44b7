use std::fs;
use std::path::Path;

use float_cmp::approx_eq;
use lmmp_to_scene::{
    import_mmp, EmptyDisplay, ImportError, ImportOperator, MemoryScene, OperatorStatus, Scene,
};

const SINGLE_NOTE: &str = r#"<song><head bpm="120"/><pattern name="A" pos="0" len="192"><note key="C4" pos="0" len="48" vol="100"/></pattern></song>"#;

const MULTI_TRACK: &str = r#"<?xml version="1.0"?>
<lmms-project version="1.0">
  <head bpm="140" mastervol="100"/>
  <song>
    <trackcontainer type="song">
      <track name="Lead">
        <pattern name="Intro" pos="0" len="768">
          <note key="57" pos="0" len="48" vol="100"/>
          <note key="60" pos="48" len="48" vol="80"/>
        </pattern>
        <pattern name="Verse" pos="768" len="768">
          <note key="57" pos="0" len="96" vol="100"/>
        </pattern>
      </track>
      <track name="Drums">
        <pattern name="Beat" pos="0" len="192">
          <pattern name="Fill" pos="0" len="48"/>
        </pattern>
      </track>
    </trackcontainer>
  </song>
</lmms-project>
"#;

fn write_song(dir: &Path, name: &str, xml: &str) {
    fs::write(dir.join(name), xml).unwrap();
}

fn keys(scene: &MemoryScene, object: &str, property: &str) -> Vec<(f64, f64)> {
    let id = scene.find(object).unwrap();
    scene
        .property(id, property)
        .unwrap()
        .keyframes
        .iter()
        .map(|k| (k.frame, k.value))
        .collect()
}

fn assert_keys(actual: &[(f64, f64)], expected: &[(f64, f64)]) {
    assert_eq!(actual.len(), expected.len(), "{:?}", actual);
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            approx_eq!(f64, a.0, e.0, epsilon = 1e-9) && approx_eq!(f64, a.1, e.1, epsilon = 1e-9),
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }
}

#[test]
fn single_note_song() {
    let dir = tempfile::tempdir().unwrap();
    write_song(dir.path(), "demo.mmp", SINGLE_NOTE);

    let mut scene = MemoryScene::new(24.0, 1.0);
    let summary = import_mmp(&mut scene, "demo.mmp", dir.path(), 1.0, 192.0).unwrap();

    // 60 / 120 / (192 / 4) * 24
    assert!(approx_eq!(f64, summary.frames_per_tick, 0.25, epsilon = 1e-12));
    assert_eq!(summary.tracks, 1);
    assert_eq!(summary.notes, 1);
    assert_eq!(summary.keyframes, 4);

    // 48 ticks last 12 frames
    assert_keys(
        &keys(&scene, "A", "note:C4"),
        &[(0.0, 0.0), (1.0, 100.0), (13.0, 100.0), (14.0, 0.0)],
    );
    assert_eq!(scene.current_frame(), 1.0);
}

#[test]
fn fractional_frames_are_not_rounded() {
    let dir = tempfile::tempdir().unwrap();
    write_song(dir.path(), "demo.mmp", SINGLE_NOTE);

    // 2.4 frames per tick
    let mut scene = MemoryScene::new(230.4, 1.0);
    let summary = import_mmp(&mut scene, "demo.mmp", dir.path(), 1.0, 192.0).unwrap();

    assert!(approx_eq!(f64, summary.frames_per_tick, 2.4, epsilon = 1e-9));
    assert_keys(
        &keys(&scene, "A", "note:C4"),
        &[(0.0, 0.0), (1.0, 100.0), (116.2, 100.0), (117.2, 0.0)],
    );
}

#[test]
fn multi_track_song() {
    let dir = tempfile::tempdir().unwrap();
    write_song(dir.path(), "project.mmp", MULTI_TRACK);

    let mut scene = MemoryScene::new(30.0, 100.0);
    let summary = import_mmp(&mut scene, "project.mmp", dir.path(), 2.0, 192.0).unwrap();

    assert_eq!(summary.song, "project");
    assert_eq!(summary.bpm, 140);
    assert_eq!(summary.tracks, 2);
    assert_eq!(summary.notes, 3);
    assert_eq!(scene.current_frame(), 100.0);

    // the pattern with no notes of its own gets no object
    assert!(scene.find("Beat").is_none());
    assert!(scene.find("Fill").is_none());

    let root = scene.find("project").unwrap();
    for name in ["Intro", "Verse"] {
        let obj = scene.object(scene.find(name).unwrap()).unwrap();
        assert_eq!(obj.parent, Some(root));
        assert_eq!(obj.empty_display, EmptyDisplay::Cube);
        assert_eq!(obj.empty_display_size, 1.0);
    }

    let scale = 60.0 / 140.0 / 48.0 * 30.0;
    let onset = 100.0 + 768.0 * scale;
    let release = onset + 96.0 * scale;
    assert_keys(
        &keys(&scene, "Verse", "note:57"),
        &[
            (onset - 2.0, 0.0),
            (onset, 100.0),
            (release, 100.0),
            (release + 2.0, 0.0),
        ],
    );
    assert_eq!(keys(&scene, "Intro", "note:60").len(), 4);
}

#[test]
fn operator_imports_selected_file() {
    let dir = tempfile::tempdir().unwrap();
    write_song(dir.path(), "demo.mmp", SINGLE_NOTE);

    let mut scene = MemoryScene::default();
    let status = ImportOperator::default()
        .execute(&mut scene, "demo.mmp", dir.path())
        .unwrap();

    match status {
        OperatorStatus::Finished(summary) => assert_eq!(summary.keyframes, 4),
        other => panic!("expected import to finish, got {:?}", other),
    }
    assert!(scene.find("demo").is_some());
}

#[test]
fn malformed_song_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_song(dir.path(), "broken.mmp", "<song><pattern name=\"A\" pos=\"0\" len=\"1\">");

    let mut scene = MemoryScene::new(24.0, 12.0);
    let err = import_mmp(&mut scene, "broken.mmp", dir.path(), 1.0, 192.0).unwrap_err();

    assert!(matches!(err, ImportError::Document(_)));
    assert!(scene.objects().is_empty());
    assert_eq!(scene.current_frame(), 12.0);
}

#[test]
fn concurrent_imports_do_not_interfere() {
    let dir = tempfile::tempdir().unwrap();
    write_song(dir.path(), "demo.mmp", SINGLE_NOTE);
    let path = dir.path().to_path_buf();

    let handles: Vec<_> = [24.0, 48.0]
        .into_iter()
        .map(|fps| {
            let path = path.clone();
            std::thread::spawn(move || {
                let mut scene = MemoryScene::new(fps, 1.0);
                import_mmp(&mut scene, "demo.mmp", &path, 1.0, 192.0).unwrap();
                keys(&scene, "A", "note:C4")
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_keys(&results[0], &[(0.0, 0.0), (1.0, 100.0), (13.0, 100.0), (14.0, 0.0)]);
    assert_keys(&results[1], &[(0.0, 0.0), (1.0, 100.0), (25.0, 100.0), (26.0, 0.0)]);
}
