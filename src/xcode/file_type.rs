//! File types Xcode assigns by extension.

use std::path::Path;

use crate::util::fs::extension;

/// `lastKnownFileType` of a path, `None` for unknown extensions.
pub fn last_known_file_type(path: &Path) -> Option<&'static str> {
    let file_type = match extension(path)? {
        "swift" => "sourcecode.swift",
        "m" => "sourcecode.c.objc",
        "mm" => "sourcecode.cpp.objcpp",
        "c" => "sourcecode.c.c",
        "cc" | "cpp" | "cxx" => "sourcecode.cpp.cpp",
        "h" => "sourcecode.c.h",
        "hpp" | "hh" => "sourcecode.cpp.h",
        "metal" => "sourcecode.metal",
        "plist" => "text.plist.xml",
        "entitlements" => "text.plist.entitlements",
        "strings" => "text.plist.strings",
        "stringsdict" => "text.plist.stringsdict",
        "xcconfig" => "text.xcconfig",
        "json" => "text.json",
        "md" => "net.daringfireball.markdown",
        "txt" => "text",
        "html" => "text.html",
        "storyboard" => "file.storyboard",
        "xib" => "file.xib",
        "xcassets" => "folder.assetcatalog",
        "xcdatamodel" => "wrapper.xcdatamodel",
        "xcdatamodeld" => "wrapper.xcdatamodeld",
        "xcmappingmodel" => "wrapper.xcmappingmodel",
        "framework" => "wrapper.framework",
        "xcframework" => "wrapper.xcframework",
        "bundle" => "wrapper.plug-in",
        "playground" => "file.playground",
        "xcodeproj" => "wrapper.pb-project",
        "a" => "archive.ar",
        "dylib" => "compiled.mach-o.dylib",
        "tbd" => "sourcecode.text-based-dylib-definition",
        "modulemap" => "sourcecode.module-map",
        "png" => "image.png",
        "jpg" | "jpeg" => "image.jpeg",
        "pdf" => "image.pdf",
        "ttf" => "file",
        "sh" => "text.script.sh",
        "scnassets" => "wrapper.scnassets",
        "mlmodel" => "file.mlmodel",
        "intentdefinition" => "file.intentdefinition",
        _ => return None,
    };
    Some(file_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types() {
        assert_eq!(last_known_file_type(Path::new("/p/a.swift")), Some("sourcecode.swift"));
        assert_eq!(
            last_known_file_type(Path::new("/p/Assets.xcassets")),
            Some("folder.assetcatalog")
        );
        assert_eq!(
            last_known_file_type(Path::new("/System/Library/Frameworks/ARKit.framework")),
            Some("wrapper.framework")
        );
    }

    #[test]
    fn test_unknown_types() {
        assert_eq!(last_known_file_type(Path::new("/p/README")), None);
        assert_eq!(last_known_file_type(Path::new("/p/data.xyz")), None);
    }
}
