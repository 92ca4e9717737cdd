use agrivoice::domain::AudioFormat;

#[test]
fn given_supported_filenames_when_resolving_format_then_extension_decides() {
    assert_eq!(AudioFormat::from_filename("question.mp3"), Some(AudioFormat::Mp3));
    assert_eq!(AudioFormat::from_filename("Voice Note.WAV"), Some(AudioFormat::Wav));
    assert_eq!(AudioFormat::from_filename("rec.m4a"), Some(AudioFormat::M4a));
}

#[test]
fn given_unsupported_or_missing_extension_when_resolving_format_then_returns_none() {
    assert_eq!(AudioFormat::from_filename("notes.txt"), None);
    assert_eq!(AudioFormat::from_filename("recording"), None);
    assert_eq!(AudioFormat::from_filename(""), None);
}

#[test]
fn given_mime_types_when_resolving_format_then_common_aliases_are_accepted() {
    assert_eq!(AudioFormat::from_mime("audio/mpeg"), Some(AudioFormat::Mp3));
    assert_eq!(AudioFormat::from_mime("audio/x-wav"), Some(AudioFormat::Wav));
    assert_eq!(AudioFormat::from_mime("audio/x-m4a"), Some(AudioFormat::M4a));
    assert_eq!(AudioFormat::from_mime("video/mp4"), None);
}

#[test]
fn given_each_format_when_mapping_back_then_extension_and_mime_resolve_to_it() {
    for format in [AudioFormat::Mp3, AudioFormat::Wav, AudioFormat::M4a] {
        assert_eq!(AudioFormat::from_extension(format.extension()), Some(format));
        assert_eq!(AudioFormat::from_mime(format.mime_type()), Some(format));
    }
}
