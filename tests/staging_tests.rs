use audioscribe::errors::MyError;
use audioscribe::util::staging::{extension_for_mime, StagedFile};
use tempfile::tempdir;

#[tokio::test]
async fn staged_file_is_released_when_the_run_succeeds() {
    let scratch = tempdir().expect("create scratch dir");
    let path;
    {
        let staged = StagedFile::create(scratch.path(), "voice_1_100", "ogg", b"payload")
            .await
            .expect("stage payload");
        path = staged.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(staged.file_name(), "voice_1_100.ogg");

        let read_back = staged.read().await.expect("read staged bytes");
        assert_eq!(read_back.as_ref(), b"payload");
    }
    assert!(!path.exists(), "staged file must not outlive its run");
}

#[tokio::test]
async fn staged_file_is_released_when_a_pipeline_step_fails() {
    let scratch = tempdir().expect("create scratch dir");

    async fn failing_run(dir: &std::path::Path) -> Result<(), MyError> {
        let _staged = StagedFile::create(dir, "voice_2_200", "ogg", b"payload").await?;
        Err(MyError::Service("transcription API returned 500".into()))
    }

    let result = failing_run(scratch.path()).await;
    assert!(matches!(result, Err(MyError::Service(_))));
    assert!(
        !scratch.path().join("voice_2_200.ogg").exists(),
        "staged file must be removed on the failure path"
    );
}

#[tokio::test]
async fn concurrent_requests_stage_to_distinct_paths() {
    let scratch = tempdir().expect("create scratch dir");

    let first = StagedFile::create(scratch.path(), "voice_7_1", "ogg", b"first")
        .await
        .expect("stage first payload");
    let second = StagedFile::create(scratch.path(), "voice_7_2", "ogg", b"second")
        .await
        .expect("stage second payload");

    assert_ne!(first.path(), second.path());
    assert_eq!(first.read().await.unwrap().as_ref(), b"first");
    assert_eq!(second.read().await.unwrap().as_ref(), b"second");

    let second_path = second.path().to_path_buf();
    drop(first);
    assert!(
        second_path.exists(),
        "releasing one staged file must not touch another"
    );
}

#[tokio::test]
async fn staged_name_combines_key_and_mime_extension() {
    let scratch = tempdir().expect("create scratch dir");
    let staged = StagedFile::create(
        scratch.path(),
        "audio_42_9000",
        extension_for_mime("audio/mpeg"),
        b"id3",
    )
    .await
    .expect("stage payload");

    assert_eq!(staged.file_name(), "audio_42_9000.mp3");
}
