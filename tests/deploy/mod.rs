mod missing_metadata_fails_after_writing_artifacts;
