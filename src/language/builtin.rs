//! Languages bundled with the shipped highlight.js build
//!
//! Generated from the extractor's output; keep in the engine's native order.

/// `(display name, alias)` pairs
pub(super) const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    ("1C:Enterprise", "1c"),
    ("Augmented Backus-Naur Form", "abnf"),
    ("Apache Access Log", "accesslog"),
    ("ActionScript", "actionscript"),
    ("Ada", "ada"),
    ("AngelScript", "angelscript"),
    ("Apache config", "apache"),
    ("AppleScript", "applescript"),
    ("ArcGIS Arcade", "arcade"),
    ("Arduino", "arduino"),
    ("ARM Assembly", "armasm"),
    ("AsciiDoc", "asciidoc"),
    ("AspectJ", "aspectj"),
    ("AutoHotkey", "autohotkey"),
    ("AutoIt", "autoit"),
    ("AVR Assembly", "avrasm"),
    ("Awk", "awk"),
    ("X++", "axapta"),
    ("Bash", "bash"),
    ("BASIC", "basic"),
    ("Backus–Naur Form", "bnf"),
    ("Brainfuck", "brainfuck"),
    ("C", "c"),
    ("C/AL", "cal"),
    ("Cap’n Proto", "capnproto"),
    ("Ceylon", "ceylon"),
    ("Clean", "clean"),
    ("Clojure", "clojure"),
    ("Clojure REPL", "clojure-repl"),
    ("CMake", "cmake"),
    ("CoffeeScript", "coffeescript"),
    ("Coq", "coq"),
    ("Caché Object Script", "cos"),
    ("C++", "cpp"),
    ("crmsh", "crmsh"),
    ("Crystal", "crystal"),
    ("C#", "csharp"),
    ("CSP", "csp"),
    ("CSS", "css"),
    ("D", "d"),
    ("Dart", "dart"),
    ("Delphi", "delphi"),
    ("Diff", "diff"),
    ("Django", "django"),
    ("DNS Zone", "dns"),
    ("Dockerfile", "dockerfile"),
    ("Batch file (DOS)", "dos"),
    ("dsconfig", "dsconfig"),
    ("Device Tree", "dts"),
    ("Dust", "dust"),
    ("Extended Backus-Naur Form", "ebnf"),
    ("Elixir", "elixir"),
    ("Elm", "elm"),
    ("ERB", "erb"),
    ("Erlang", "erlang"),
    ("Erlang REPL", "erlang-repl"),
    ("Excel formulae", "excel"),
    ("FIX", "fix"),
    ("Flix", "flix"),
    ("Fortran", "fortran"),
    ("F#", "fsharp"),
    ("GAMS", "gams"),
    ("GAUSS", "gauss"),
    ("G-code (ISO 6983)", "gcode"),
    ("Gherkin", "gherkin"),
    ("GLSL", "glsl"),
    ("GML", "gml"),
    ("Go", "go"),
    ("Golo", "golo"),
    ("Gradle", "gradle"),
    ("GraphQL", "graphql"),
    ("Groovy", "groovy"),
    ("HAML", "haml"),
    ("Handlebars", "handlebars"),
    ("Haskell", "haskell"),
    ("Haxe", "haxe"),
    ("HSP", "hsp"),
    ("HTTP", "http"),
    ("Hy", "hy"),
    ("Inform 7", "inform7"),
    ("TOML, also INI", "ini"),
    ("IRPF90", "irpf90"),
    ("ISBL", "isbl"),
    ("Java", "java"),
    ("JavaScript", "javascript"),
    ("JBoss CLI", "jboss-cli"),
    ("JSON", "json"),
    ("Julia", "julia"),
    ("Julia REPL", "julia-repl"),
    ("Kotlin", "kotlin"),
    ("Lasso", "lasso"),
    ("LaTeX", "latex"),
    ("LDIF", "ldif"),
    ("Leaf", "leaf"),
    ("Less", "less"),
    ("Lisp", "lisp"),
    ("LiveCode", "livecodeserver"),
    ("LiveScript", "livescript"),
    ("LLVM IR", "llvm"),
    ("LSL (Linden Scripting Language)", "lsl"),
    ("Lua", "lua"),
    ("Makefile", "makefile"),
    ("Markdown", "markdown"),
    ("Mathematica", "mathematica"),
    ("Matlab", "matlab"),
    ("Maxima", "maxima"),
    ("MEL", "mel"),
    ("Mercury", "mercury"),
    ("MIPS Assembly", "mipsasm"),
    ("Mizar", "mizar"),
    ("Mojolicious", "mojolicious"),
    ("Monkey", "monkey"),
    ("MoonScript", "moonscript"),
    ("N1QL", "n1ql"),
    ("Nested Text", "nestedtext"),
    ("Nginx config", "nginx"),
    ("Nim", "nim"),
    ("Nix", "nix"),
    ("Node REPL", "node-repl"),
    ("NSIS", "nsis"),
    ("Objective-C", "objectivec"),
    ("OCaml", "ocaml"),
    ("OpenSCAD", "openscad"),
    ("Oxygene", "oxygene"),
    ("Parser3", "parser3"),
    ("Perl", "perl"),
    ("Packet Filter config", "pf"),
    ("PostgreSQL", "pgsql"),
    ("php", "php"),
    ("PHP template", "php-template"),
    ("Plain text", "plaintext"),
    ("Pony", "pony"),
    ("PowerShell", "powershell"),
    ("Processing", "processing"),
    ("Python profiler", "profile"),
    ("Prolog", "prolog"),
    (".properties", "properties"),
    ("Protocol Buffers", "protobuf"),
    ("Puppet", "puppet"),
    ("PureBASIC", "purebasic"),
    ("Python", "python"),
    ("python-repl", "python-repl"),
    ("Q", "q"),
    ("QML", "qml"),
    ("R", "r"),
    ("ReasonML", "reasonml"),
    ("RenderMan RIB", "rib"),
    ("Roboconf", "roboconf"),
    ("MikroTik RouterOS script", "routeros"),
    ("RenderMan RSL", "rsl"),
    ("Ruby", "ruby"),
    ("Oracle Rules Language", "ruleslanguage"),
    ("Rust", "rust"),
    ("SAS", "sas"),
    ("Scala", "scala"),
    ("Scheme", "scheme"),
    ("Scilab", "scilab"),
    ("SCSS", "scss"),
    ("Shell Session", "shell"),
    ("Smali", "smali"),
    ("Smalltalk", "smalltalk"),
    ("SML (Standard ML)", "sml"),
    ("SQF", "sqf"),
    ("SQL", "sql"),
    ("Stan", "stan"),
    ("Stata", "stata"),
    ("STEP Part 21", "step21"),
    ("Stylus", "stylus"),
    ("SubUnit", "subunit"),
    ("Swift", "swift"),
    ("Tagger Script", "taggerscript"),
    ("Test Anything Protocol", "tap"),
    ("Tcl", "tcl"),
    ("Thrift", "thrift"),
    ("TP", "tp"),
    ("Twig", "twig"),
    ("TypeScript", "typescript"),
    ("Vala", "vala"),
    ("Visual Basic .NET", "vbnet"),
    ("VBScript", "vbscript"),
    ("VBScript in HTML", "vbscript-html"),
    ("Verilog", "verilog"),
    ("VHDL", "vhdl"),
    ("Vim Script", "vim"),
    ("WebAssembly", "wasm"),
    ("Wren", "wren"),
    ("Intel x86 Assembly", "x86asm"),
    ("XL", "xl"),
    ("HTML, XML", "xml"),
    ("XQuery", "xquery"),
    ("YAML", "yaml"),
    ("Zephir", "zephir"),
];
