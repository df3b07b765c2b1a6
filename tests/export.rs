use trussview::{ExportError, RenderOptions, Scene, Truss};

const PRATT: &str = include_str!("data/pratt.txt");

#[test]
fn exported_image_matches_scene_bounds() {
    let truss = Truss::parse(PRATT).expect("valid description");
    let scene = Scene::from_truss(&truss);
    assert_eq!(scene.segments().len(), 9);

    let options = RenderOptions {
        zoom: 0.25,
        stroke_width: 2.0,
    };
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("pratt.png");
    scene.export_png(&path, &options).expect("export succeeds");

    let bytes = std::fs::read(&path).expect("png written");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    // 3000 x 1000 units at a quarter pixel per unit, plus one stroke of padding.
    let pixmap = tiny_skia::Pixmap::load_png(&path).expect("png decodes");
    assert_eq!((pixmap.width(), pixmap.height()), (752, 252));
}

#[test]
fn truss_without_drawable_links_is_not_exported() {
    let truss = Truss::parse("node, A, 0, 0\nlink, L, A, Z, 1, 1, steel").expect("valid");
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("empty.png");

    let error = Scene::from_truss(&truss)
        .export_png(&path, &RenderOptions::default())
        .expect_err("nothing to draw");
    assert!(matches!(error, ExportError::EmptyScene));
    assert!(!path.exists());
}

#[test]
fn unwritable_destination_is_reported() {
    let truss = Truss::parse(PRATT).expect("valid description");
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("out.png");

    let error = Scene::from_truss(&truss)
        .export_png(
            &path,
            &RenderOptions {
                zoom: 0.25,
                ..RenderOptions::default()
            },
        )
        .expect_err("parent directory does not exist");
    assert!(matches!(error, ExportError::Io { .. }));
}
