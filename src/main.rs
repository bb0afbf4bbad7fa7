use clap::Parser;
use epubweb::epub::paths;
use epubweb::{
    resolve_navigation, resolve_spine, ConversionConfig, EpubArchive, Navigation, Result,
    SpineEntry, SpineSource, Workspace,
};
use std::fs;
use std::path::Path;

/// 📚 epubweb - EPUB转网页预处理工具
#[derive(Parser)]
#[command(name = "epubweb")]
#[command(about = "解析EPUB的脊柱与目录，为网页序列生成做准备")]
#[command(version)]
struct Args {
    /// EPUB文件路径
    #[arg(help = "要处理的EPUB文件路径")]
    epub_file: String,

    /// 提取和输出的根目录
    #[arg(short, long, help = "提取和输出的根目录(覆盖配置文件)")]
    output: Option<String>,

    /// 详细输出模式
    #[arg(short, long, help = "显示详细信息")]
    verbose: bool,

    /// 显示脊柱
    #[arg(short, long, help = "显示OPF脊柱(阅读顺序)")]
    spine: bool,

    /// 显示目录
    #[arg(short, long, help = "显示NCX目录与书籍信息")]
    toc: bool,

    /// 显示链接表
    #[arg(short, long, help = "显示相邻文档之间的相对链接表")]
    links: bool,

    /// 显示指定章节的纯文本内容
    #[arg(short, long, help = "显示指定目录条目的纯文本内容(从1开始)")]
    chapter: Option<usize>,

    /// 章节内容最大显示长度
    #[arg(long, default_value = "2000", help = "章节内容最大显示字符数(0表示不限制)")]
    max_length: usize,

    /// 保留提取出的文件树
    #[arg(short, long, help = "处理结束后保留提取出的文件树")]
    keep: bool,

    /// 配置文件路径
    #[arg(long, help = "YAML配置文件路径，不存在时自动生成默认配置")]
    config: Option<String>,
}

fn main() {
    let args = Args::parse();

    println!("📚 epubweb - EPUB转网页预处理工具");
    println!("正在处理EPUB文件: {}", args.epub_file);

    match process_epub(&args) {
        Ok(_) => println!("\n🎉 EPUB处理完成！"),
        Err(e) => eprintln!("\n❌ 错误: {}", e),
    }
}

fn process_epub(args: &Args) -> Result<()> {
    // 配置来自文件和命令行，工作目录始终显式传入
    let mut config = match &args.config {
        Some(path) => ConversionConfig::load_or_init(path)?,
        None => ConversionConfig::default(),
    };
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if args.keep {
        config.keep_extracted = true;
    }

    // 打开并提取容器
    let mut archive = EpubArchive::open(&args.epub_file)?;
    println!("\n📦 容器信息:");
    println!("  共 {} 个条目", archive.len());

    let book_name = Path::new(&args.epub_file)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "book".to_string());
    let book_name = paths::trim_suffix(&book_name, ".epub").to_string();

    let workspace = Workspace::create(Path::new(&config.output_dir).join(&book_name))?;
    let created = archive.extract_all(workspace.root())?;
    println!("  已提取 {} 个条目到 {}", created.len(), workspace.root().display());

    if args.verbose {
        for (i, file) in workspace.list_files()?.iter().enumerate() {
            println!("  {}. {}", i + 1, file);
        }
    }

    // 定位并解析包文档
    let opf_path = workspace.package_document()?;
    println!("\n📖 包文档: {}", opf_path.display());
    let spine = resolve_spine(&opf_path)?;
    println!("  脊柱条目: {} 个", spine.len());

    // 定位并解析导航文档
    let ncx_path = workspace.navigation_document()?;
    println!("🧭 导航文档: {}", ncx_path.display());
    let ncx_content = fs::read_to_string(&ncx_path)?;
    let base_dir = ncx_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| workspace.root().to_path_buf());
    let navigation = resolve_navigation(&ncx_content, &base_dir)?;
    println!("  目录条目: {} 个", navigation.entries.len());

    display_warnings(&navigation);
    display_book_info(&navigation);

    if args.spine || args.verbose {
        display_spine(&spine);
    }

    if args.toc || args.verbose {
        display_toc(&navigation);
    }

    if args.links {
        let source = match config.spine_source {
            SpineSource::Opf => &spine,
            SpineSource::Ncx => &navigation.entries,
        };
        display_links(source, config.spine_source);
    }

    if let Some(index) = args.chapter {
        display_chapter(&navigation, &base_dir, index, args.max_length)?;
    }

    // 提取树默认只在运行期间存在
    if !config.keep_extracted {
        workspace.cleanup()?;
    } else {
        println!("\n📁 提取出的文件树已保留");
    }

    Ok(())
}

/// 显示解析过程中收集的警告
fn display_warnings(navigation: &Navigation) {
    if navigation.warnings.is_empty() {
        return;
    }

    println!("\n⚠️  警告:");
    for warning in &navigation.warnings {
        println!("  - {}", warning);
    }
}

/// 显示书籍基本信息
fn display_book_info(navigation: &Navigation) {
    println!("\n📊 书籍信息:");
    if navigation.info.title.is_empty() {
        println!("  标题: (未知)");
    } else {
        println!("  标题: {}", navigation.info.title);
    }
    if !navigation.info.author.is_empty() {
        println!("  作者: {}", navigation.info.author);
    }
}

/// 显示OPF脊柱(阅读顺序)
fn display_spine(spine: &[SpineEntry]) {
    println!("\n📜 脊柱(阅读顺序):");
    for (i, entry) in spine.iter().enumerate() {
        println!("  {}. {}", i + 1, entry.path);
    }
}

/// 显示NCX目录
fn display_toc(navigation: &Navigation) {
    println!("\n🌳 目录:");
    for (i, entry) in navigation.entries.iter().enumerate() {
        println!("  {}. {} -> {}", i + 1, entry.label, entry.path);
    }
}

/// 显示相邻文档之间的相对链接表
///
/// 这是页面生成阶段重写上一页/下一页链接时使用的路径。
fn display_links(entries: &[SpineEntry], source: SpineSource) {
    println!("\n🔗 相邻链接表(来源: {:?}):", source);

    for (i, entry) in entries.iter().enumerate() {
        let prev = if i > 0 {
            paths::relative_path(&entry.path, &entries[i - 1].path)
        } else {
            "-".to_string()
        };
        let next = if i + 1 < entries.len() {
            paths::relative_path(&entry.path, &entries[i + 1].path)
        } else {
            "-".to_string()
        };
        println!("  {}. {} [上一页: {}] [下一页: {}]", i + 1, entry.path, prev, next);
    }
}

/// 显示指定目录条目的纯文本内容
fn display_chapter(
    navigation: &Navigation,
    base_dir: &Path,
    index: usize,
    max_length: usize,
) -> Result<()> {
    println!("\n📝 章节内容:");

    if index == 0 || index > navigation.entries.len() {
        println!(
            "  ❌ 无效的目录条目索引: {}。可用范围: 1-{}",
            index,
            navigation.entries.len()
        );
        return Ok(());
    }

    let entry = &navigation.entries[index - 1];
    println!("  📄 {}: {}", entry.label, entry.path);

    let html = fs::read_to_string(base_dir.join(&entry.path))?;
    let content = epubweb::epub::text::extract_plain_text(&html);

    let total = content.chars().count();
    let display_content = if max_length > 0 && total > max_length {
        println!("  ✂️  内容已截断到 {} 字符(共 {} 字符)", max_length, total);
        content.chars().take(max_length).collect::<String>()
    } else {
        content
    };

    println!("{}", display_content);
    Ok(())
}
