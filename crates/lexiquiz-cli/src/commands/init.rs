//! The `lexiquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing("lexiquiz.toml", SAMPLE_CONFIG)?;
    write_if_missing("words.csv", SAMPLE_WORD_LIST)?;

    println!("\nNext steps:");
    println!("  1. Add your own words to words.csv");
    println!("  2. Run: lexiquiz validate --words words.csv");
    println!("  3. Run: lexiquiz play");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if std::path::Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lexiquiz configuration

word_list = "words.csv"
word_count = 10
distractor_count = 3
direction = "source-to-target"
reveal_delay_ms = 1000
dictionary_url = "https://dexonline.ro/definitie/{slug}"

[languages]
source = "Romanian"
target = "Turkish"

[table]
delimiter = ","

[table.columns]
source = "Romence Kelime"
target = "Türkçe Anlamı"
category = "Kelime Türü"
example = "Örnek Cümle"
"#;

const SAMPLE_WORD_LIST: &str = r#"Romence Kelime,Türkçe Anlamı,Kelime Türü,Örnek Cümle
măr,elma,isim,Mărul este roșu.
pară,armut,isim,"Para este dulce, nu acră."
câine (m.),köpek,isim,Câinele latră la poștaș.
pisică,kedi,isim,Pisica doarme pe canapea.
casă,ev,isim,Casa noastră are o grădină.
carte,kitap,isim,"Citesc o carte nouă, foarte bună."
apă,su,isim,Beau apă rece.
pâine,ekmek,isim,Pâinea este proaspătă.
a mânca,yemek,fiil,Vreau să mănânc acum.
a bea,içmek,fiil,Copilul bea lapte.
"a merge, a umbla",gitmek,fiil,Merg la școală în fiecare zi.
a citi,okumak,fiil,Îmi place să citesc seara.
a scrie,yazmak,fiil,Scriu o scrisoare prietenului meu.
a dormi,uyumak,fiil,Bebelușul doarme liniștit.
roșu,kırmızı,sıfat,Trandafirul este roșu.
mare,büyük,sıfat,Orașul este foarte mare.
mic,küçük,sıfat,Am un apartament mic.
"frumos, frumoasă",güzel,sıfat,Ce zi frumoasă!
nou,yeni,sıfat,Mi-am cumpărat un telefon nou.
vechi,eski,sıfat,Castelul este foarte vechi.
repede,hızlı,zarf,Trenul merge repede.
încet,yavaş,zarf,"Vorbește încet, te rog."
azi,bugün,zarf,Azi este luni.
mâine,yarın,zarf,Mâine plecăm la mare.
aici,burada,zarf,Locuiesc aici de doi ani.
"#;
