//! Encoder argument construction.

use std::path::Path;

use super::types::ConversionRequest;

/// Builds the encoder argument list for a conversion.
///
/// Pure function: `-i <input> -ab <bitrate> -y`, then the codec pair for
/// formats that need one, then the output path last. The caller supplies
/// the output path so the list stays a plain function of its inputs.
pub fn build_args(request: &ConversionRequest, output_path: &Path) -> Vec<String> {
    let mut args = vec![
        "-i".to_string(),
        request.input_path.to_string_lossy().to_string(),
        "-ab".to_string(),
        request.bitrate.as_arg(),
        "-y".to_string(), // Overwrite output
    ];

    // Codec selection goes immediately before the output path
    if let Some(codec) = request.format.codec() {
        args.extend(["-acodec".to_string(), codec.to_string()]);
    }

    args.push(output_path.to_string_lossy().to_string());

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::types::{AudioFormat, Bitrate, ConversionRequest};

    fn request(input: &str, format: AudioFormat) -> ConversionRequest {
        ConversionRequest::new(input, "/out", format)
    }

    #[test]
    fn test_mp3_command_shape() {
        let request = request("/music/song.wav", AudioFormat::Mp3).with_bitrate_str("192");
        let output = request.output_path();
        let args = build_args(&request, &output);

        assert_eq!(
            args,
            vec![
                "-i",
                "/music/song.wav",
                "-ab",
                "192k",
                "-y",
                "-acodec",
                "libmp3lame",
                "/out/song_converted.mp3",
            ]
        );
    }

    #[test]
    fn test_codec_flag_sits_before_output_path() {
        for (format, codec) in [
            (AudioFormat::Mp3, "libmp3lame"),
            (AudioFormat::Aac, "aac"),
            (AudioFormat::Ogg, "libvorbis"),
        ] {
            let request = request("/music/a.wav", format);
            let output = request.output_path();
            let args = build_args(&request, &output);

            let tail = &args[args.len() - 3..];
            assert_eq!(tail[0], "-acodec");
            assert_eq!(tail[1], codec);
            assert_eq!(tail[2], output.to_string_lossy());
        }
    }

    #[test]
    fn test_container_default_formats_get_no_codec_flag() {
        for format in [AudioFormat::Wav, AudioFormat::Flac] {
            let request = request("/music/a.mp3", format);
            let output = request.output_path();
            let args = build_args(&request, &output);

            assert!(!args.contains(&"-acodec".to_string()));
            assert_eq!(args.last().unwrap(), &output.to_string_lossy().to_string());
        }
    }

    #[test]
    fn test_empty_bitrate_uses_default() {
        let request = request("/music/clip.m4a", AudioFormat::Flac).with_bitrate_str("");
        let output = request.output_path();
        let args = build_args(&request, &output);

        let ab = args.iter().position(|a| a == "-ab").unwrap();
        assert_eq!(args[ab + 1], "192k");
        assert!(!args.contains(&"-acodec".to_string()));
        assert!(args.last().unwrap().ends_with(".flac"));
    }

    #[test]
    fn test_non_numeric_bitrate_uses_default() {
        let request = request("/music/a.wav", AudioFormat::Ogg).with_bitrate_str("lots");
        let args = build_args(&request, &request.output_path());
        assert!(args.contains(&"192k".to_string()));
    }

    #[test]
    fn test_explicit_bitrate_is_applied() {
        let request =
            request("/music/a.wav", AudioFormat::Mp3).with_bitrate(Bitrate::from_kbps(320));
        let args = build_args(&request, &request.output_path());
        assert!(args.contains(&"320k".to_string()));
        assert!(!args.contains(&"192k".to_string()));
    }

    #[test]
    fn test_overwrite_flag_always_present() {
        for format in AudioFormat::all() {
            let request = request("/music/a.wav", format);
            let args = build_args(&request, &request.output_path());
            assert!(args.contains(&"-y".to_string()));
        }
    }
}
